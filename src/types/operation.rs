//! Operation types for ledger scripts
//!
//! A script is a sequence of balance queries and balance mutations applied
//! to the ledger in order. These types describe one such step and what it
//! produced.

use super::account::{Account, AccountNumber};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operations a caller can issue against the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Read the current balance without side effects
    Balance,

    /// Increase the balance by the operation amount
    Deposit,

    /// Decrease the balance by the operation amount
    ///
    /// Rejected when the amount exceeds the current balance.
    Withdraw,
}

impl OperationType {
    /// Lowercase name used in scripts and log output
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Balance => "balance",
            OperationType::Deposit => "deposit",
            OperationType::Withdraw => "withdraw",
        }
    }
}

/// One parsed script step
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// What to do
    pub op: OperationType,

    /// The account the operation targets
    pub account: AccountNumber,

    /// Amount to apply
    ///
    /// Always present for deposits and withdrawals; ignored for balance queries.
    pub amount: Option<Decimal>,
}

/// Successful result of applying an [`OperationRecord`]
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    /// The balance that was read
    Balance(Decimal),

    /// The account as persisted after a deposit or withdrawal
    Updated(Account),
}

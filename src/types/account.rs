//! Account-related types for the account ledger
//!
//! This module defines the Account record, the only persisted entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account identifier
///
/// Acts as the primary key of the account collection and never changes
/// once an account exists.
pub type AccountNumber = i32;

/// Number of the account provisioned at startup
pub const SEED_ACCOUNT: AccountNumber = 54321;

/// Opening balance of the seed account
pub fn seed_balance() -> Decimal {
    Decimal::new(160, 0)
}

/// A single account record
///
/// Rendered as `{ "number": ..., "balance": "..." }`. The balance is
/// serialized as a decimal string so no precision is lost on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account number (primary key)
    pub number: AccountNumber,

    /// Current balance
    ///
    /// May be zero or negative. Only withdrawals that exceed the current
    /// balance are rejected; nothing else constrains this value.
    pub balance: Decimal,
}

impl Account {
    /// Create an account record with the given opening balance
    pub fn new(number: AccountNumber, balance: Decimal) -> Self {
        Account { number, balance }
    }
}

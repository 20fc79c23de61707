//! Account ledger
//!
//! This module provides the `AccountLedger` struct, the only component with
//! decision logic. It enforces two rules:
//! - an operation on an unknown account fails with `AccountNotFound`
//! - a withdrawal may never exceed the balance it is checked against
//!
//! Every mutation is a single read-check-write handed to the store's
//! [`AccountStore::update`], which performs it atomically. The account returned
//! to the caller is the value that was persisted.

use crate::core::traits::AccountStore;
use crate::types::{
    seed_balance, Account, AccountNumber, LedgerError, OperationOutcome, OperationRecord,
    OperationType, SEED_ACCOUNT,
};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Balance query and mutation rules over an [`AccountStore`]
///
/// Cheap to clone; clones share the same store. The ledger keeps no state
/// of its own, so it can be used from many threads at once.
#[derive(Clone)]
pub struct AccountLedger {
    store: Arc<dyn AccountStore>,
}

impl std::fmt::Debug for AccountLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountLedger").finish_non_exhaustive()
    }
}

impl AccountLedger {
    /// Create a ledger over the given store
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Create a new account with an opening balance
    ///
    /// Any opening balance is accepted, including zero and negative values.
    ///
    /// # Errors
    ///
    /// * `AccountAlreadyExists` - if the number is already taken
    pub fn open_account(
        &self,
        number: AccountNumber,
        opening_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        let account = Account::new(number, opening_balance);
        self.store.insert(&account)?;
        tracing::info!(account = number, balance = %opening_balance, "account opened");
        Ok(account)
    }

    /// Provision the default account unless it already exists
    ///
    /// Returns `true` when the account was created by this call.
    pub fn ensure_seed(&self) -> Result<bool, LedgerError> {
        match self.open_account(SEED_ACCOUNT, seed_balance()) {
            Ok(_) => Ok(true),
            Err(LedgerError::AccountAlreadyExists { .. }) => {
                tracing::debug!(account = SEED_ACCOUNT, "seed account already present");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Look up an account
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - if no account has this number
    pub fn get_account(&self, number: AccountNumber) -> Result<Account, LedgerError> {
        self.store
            .find(number)?
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    /// Current balance of an account, without side effects
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - if no account has this number
    pub fn get_balance(&self, number: AccountNumber) -> Result<Decimal, LedgerError> {
        self.get_account(number).map(|account| account.balance)
    }

    /// Add `amount` to the balance and return the persisted account
    ///
    /// No floor is placed on `amount`: zero and negative deposits are applied
    /// as given.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - if no account has this number
    /// * `ArithmeticOverflow` - if the new balance is not representable
    pub fn deposit(&self, number: AccountNumber, amount: Decimal) -> Result<Account, LedgerError> {
        let account = self.apply_delta(number, &mut |account| {
            account.balance = account
                .balance
                .checked_add(amount)
                .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", number))?;
            Ok(())
        })?;

        tracing::debug!(account = number, amount = %amount, balance = %account.balance, "deposit applied");
        Ok(account)
    }

    /// Subtract `amount` from the balance and return the persisted account
    ///
    /// The check is strict: withdrawing exactly the balance succeeds and
    /// leaves zero.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - if no account has this number
    /// * `InsufficientFunds` - if `amount` exceeds the balance; nothing is written
    /// * `ArithmeticOverflow` - if the new balance is not representable
    pub fn withdraw(&self, number: AccountNumber, amount: Decimal) -> Result<Account, LedgerError> {
        let account = self.apply_delta(number, &mut |account| {
            if account.balance < amount {
                return Err(LedgerError::insufficient_funds(
                    number,
                    account.balance,
                    amount,
                ));
            }

            account.balance = account
                .balance
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::arithmetic_overflow("withdraw", number))?;
            Ok(())
        })?;

        tracing::debug!(account = number, amount = %amount, balance = %account.balance, "withdrawal applied");
        Ok(account)
    }

    /// All accounts, sorted by number
    pub fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        self.store.accounts()
    }

    /// Apply one script operation
    ///
    /// # Errors
    ///
    /// Returns the same errors as the operation it dispatches to, plus a
    /// `ParseError` when a deposit or withdrawal carries no amount.
    pub fn apply(&self, record: &OperationRecord) -> Result<OperationOutcome, LedgerError> {
        match record.op {
            OperationType::Balance => self
                .get_balance(record.account)
                .map(OperationOutcome::Balance),
            OperationType::Deposit => {
                let amount = required_amount(record)?;
                self.deposit(record.account, amount)
                    .map(OperationOutcome::Updated)
            }
            OperationType::Withdraw => {
                let amount = required_amount(record)?;
                self.withdraw(record.account, amount)
                    .map(OperationOutcome::Updated)
            }
        }
    }

    fn apply_delta(
        &self,
        number: AccountNumber,
        apply: &mut dyn FnMut(&mut Account) -> Result<(), LedgerError>,
    ) -> Result<Account, LedgerError> {
        self.store
            .update(number, apply)?
            .ok_or_else(|| LedgerError::account_not_found(number))
    }
}

fn required_amount(record: &OperationRecord) -> Result<Decimal, LedgerError> {
    record.amount.ok_or_else(|| LedgerError::ParseError {
        line: None,
        message: format!(
            "{} on account {} requires an amount",
            record.op.as_str(),
            record.account
        ),
    })
}

//! Storage adapter trait for account persistence
//!
//! The ledger talks to storage exclusively through [`AccountStore`], so the
//! in-memory and SQLite implementations can be swapped at startup.

use crate::types::{Account, AccountNumber, LedgerError};

/// Closure applied to an account inside a storage session
///
/// Returning an error aborts the session without writing anything.
pub type ApplyFn<'a> = dyn FnMut(&mut Account) -> Result<(), LedgerError> + 'a;

/// Trait for persisting account records
///
/// Every call acquires its own storage session and releases it before
/// returning, on success and on failure alike.
pub trait AccountStore: Send + Sync {
    /// Load an account by number
    ///
    /// Returns `Ok(None)` when no such account exists.
    fn find(&self, number: AccountNumber) -> Result<Option<Account>, LedgerError>;

    /// Read, modify and write one account as a single atomic step
    ///
    /// `apply` receives a copy of the stored account. If it succeeds the copy
    /// is persisted and returned; if it fails nothing is written and its error
    /// is returned. Returns `Ok(None)` when the account does not exist, in
    /// which case `apply` is never called.
    fn update(
        &self,
        number: AccountNumber,
        apply: &mut ApplyFn<'_>,
    ) -> Result<Option<Account>, LedgerError>;

    /// Insert a new account
    ///
    /// Fails with `AccountAlreadyExists` if the number is taken.
    fn insert(&self, account: &Account) -> Result<(), LedgerError>;

    /// All accounts, sorted by number
    fn accounts(&self) -> Result<Vec<Account>, LedgerError>;
}

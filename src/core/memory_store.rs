//! Thread-safe in-memory account storage
//!
//! This module provides the `MemoryAccountStore` struct, which keeps account
//! records in a `DashMap`. It is the store used when no database is
//! configured.
//!
//! # Thread Safety
//!
//! `update` holds the DashMap entry guard for the whole read-check-write, so
//! two concurrent withdrawals on the same account are serialized and neither
//! can act on a stale balance. Operations on different accounts only contend
//! when they hash to the same shard.

use crate::core::traits::{AccountStore, ApplyFn};
use crate::types::{Account, AccountNumber, LedgerError};
use dashmap::DashMap;

/// In-memory account store backed by `DashMap`
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    /// Account records keyed by account number
    accounts: DashMap<AccountNumber, Account>,
}

impl MemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }
}

impl AccountStore for MemoryAccountStore {
    fn find(&self, number: AccountNumber) -> Result<Option<Account>, LedgerError> {
        Ok(self.accounts.get(&number).map(|entry| entry.value().clone()))
    }

    fn update(
        &self,
        number: AccountNumber,
        apply: &mut ApplyFn<'_>,
    ) -> Result<Option<Account>, LedgerError> {
        let Some(mut entry) = self.accounts.get_mut(&number) else {
            return Ok(None);
        };

        // Work on a copy so a failed closure leaves the stored record untouched
        let mut account = entry.value().clone();
        apply(&mut account)?;
        *entry.value_mut() = account.clone();

        Ok(Some(account))
    }

    fn insert(&self, account: &Account) -> Result<(), LedgerError> {
        let mut inserted = false;
        self.accounts.entry(account.number).or_insert_with(|| {
            inserted = true;
            account.clone()
        });

        if inserted {
            Ok(())
        } else {
            Err(LedgerError::account_already_exists(account.number))
        }
    }

    fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|account| account.number);
        Ok(accounts)
    }
}

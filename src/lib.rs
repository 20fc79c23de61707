//! Account Ledger Library
//! # Overview
//!
//! This library keeps monetary balances for numbered accounts and applies
//! balance queries, deposits and withdrawals to them, either one at a time or
//! from a CSV operation script using a sync or an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, OperationRecord, LedgerError)
//! - [`cli`] - CLI arguments parsing and command dispatch
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Balance rules (sufficient funds, unknown accounts)
//!   - [`core::traits`] - The storage adapter the ledger runs on
//!   - [`core::memory_store`] - Process-lifetime store
//!   - [`core::sqlite_store`] - Persistent store backed by a SQLite file
//! - [`io`] - Operation script parsing and account output
//! - [`strategy`] - Sync and async script processing pipelines
//! - [`logging`] - Tracing subscriber setup
//!
//! # Operations
//!
//! - **Balance**: Read the current balance of an account
//! - **Deposit**: Add an amount to an account
//! - **Withdraw**: Subtract an amount, rejected when the balance is smaller
//!   than the amount
//!
//! Every store is provisioned with account `54321` holding `160` unless the
//! caller opts out.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{open_store, AccountLedger, AccountStore, MemoryAccountStore, SqliteAccountStore};
pub use io::write_accounts_csv;
pub use types::{
    seed_balance, Account, AccountNumber, LedgerError, OperationOutcome, OperationRecord,
    OperationType, SEED_ACCOUNT,
};

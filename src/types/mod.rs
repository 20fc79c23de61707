//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: The account record and its identifier
//! - `operation`: Script operations and their outcomes
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod operation;

pub use account::{seed_balance, Account, AccountNumber, SEED_ACCOUNT};
pub use error::LedgerError;
pub use operation::{OperationOutcome, OperationRecord, OperationType};

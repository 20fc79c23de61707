//! Core business logic module
//!
//! This module contains the ledger and its storage adapters:
//! - `traits` - The `AccountStore` storage adapter trait
//! - `batch_processor` - Account-partitioned parallel application of script batches
//! - `ledger` - Balance query and mutation rules
//! - `memory_store` - DashMap-backed store (default)
//! - `sqlite_store` - SQLite-backed store, one connection per call

pub mod batch_processor;
pub mod ledger;
pub mod memory_store;
pub mod sqlite_store;
pub mod traits;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use ledger::AccountLedger;
pub use memory_store::MemoryAccountStore;
pub use sqlite_store::SqliteAccountStore;
pub use traits::AccountStore;

use crate::types::LedgerError;
use std::path::Path;
use std::sync::Arc;

/// Select and open the account store
///
/// A database path selects the SQLite store; without one the ledger runs
/// on the in-memory store and its contents end with the process.
pub fn open_store(database: Option<&Path>) -> Result<Arc<dyn AccountStore>, LedgerError> {
    match database {
        Some(path) => {
            tracing::info!(path = %path.display(), "using SQLite account store");
            Ok(Arc::new(SqliteAccountStore::open(path)?))
        }
        None => {
            tracing::info!("using in-memory account store");
            Ok(Arc::new(MemoryAccountStore::new()))
        }
    }
}

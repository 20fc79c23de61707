//! Synchronous processing strategy
//!
//! Streams the script with `SyncReader` and applies each operation to the
//! ledger in file order on the calling thread.

use crate::core::AccountLedger;
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// ```no_run
/// use account_ledger::core::{AccountLedger, MemoryAccountStore};
/// use account_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let ledger = AccountLedger::new(Arc::new(MemoryAccountStore::new()));
/// let mut output = std::io::stdout();
///
/// SyncProcessingStrategy
///     .process(&ledger, Path::new("operations.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        ledger: &AccountLedger,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError> {
        let reader = SyncReader::new(input_path)?;
        let mut summary = ProcessingSummary::default();

        for result in reader {
            match result {
                Ok(record) => {
                    let outcome = ledger.apply(&record);
                    summary.record(&record, &outcome);
                }
                Err(e) => tracing::warn!("Skipping script record: {}", e),
            }
        }

        write_accounts_csv(&ledger.accounts()?, output)?;

        tracing::info!(
            applied = summary.applied,
            rejected = summary.rejected,
            failed = summary.failed,
            "script processed"
        );
        Ok(summary)
    }
}

//! Processing strategy module for operation scripts
//!
//! This module defines the Strategy pattern for complete script processing
//! pipelines, covering both CSV parsing and ledger application, so the
//! synchronous and asynchronous implementations can be selected at runtime.

use crate::cli::StrategyType;
use crate::core::AccountLedger;
use crate::types::{LedgerError, OperationOutcome, OperationRecord};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Counts of what happened while processing a script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Operations the ledger accepted
    pub applied: usize,
    /// Operations refused by a ledger rule (unknown account, insufficient funds)
    pub rejected: usize,
    /// Operations that could not be evaluated (storage, overflow, lost tasks)
    pub failed: usize,
}

impl ProcessingSummary {
    /// Count (and log) the outcome of one operation
    pub fn record(
        &mut self,
        record: &OperationRecord,
        result: &Result<OperationOutcome, LedgerError>,
    ) {
        match result {
            Ok(outcome) => {
                self.applied += 1;
                tracing::debug!(
                    op = record.op.as_str(),
                    account = record.account,
                    ?outcome,
                    "operation applied"
                );
            }
            Err(e) if e.is_domain() => {
                self.rejected += 1;
                tracing::warn!(
                    op = record.op.as_str(),
                    account = record.account,
                    kind = e.kind(),
                    "operation rejected: {}",
                    e
                );
            }
            Err(e) => {
                self.failed += 1;
                tracing::error!(
                    op = record.op.as_str(),
                    account = record.account,
                    kind = e.kind(),
                    "operation failed: {}",
                    e
                );
            }
        }
    }

    /// Total number of operations counted
    pub fn total(&self) -> usize {
        self.applied + self.rejected + self.failed
    }
}

/// Processing strategy trait for complete script processing pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Apply every operation in `input_path` to `ledger`, then write all
    /// accounts to `output`
    ///
    /// Malformed records and rejected operations are logged and skipped;
    /// they never abort processing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - The storage backend fails while listing accounts
    /// - Output cannot be written
    fn process(
        &self,
        ledger: &AccountLedger,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` only applies to the async strategy.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Account, OperationType};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn withdrawal() -> OperationRecord {
        OperationRecord {
            op: OperationType::Withdraw,
            account: 54321,
            amount: Some(Decimal::new(10, 0)),
        }
    }

    #[rstest]
    #[case::applied(Ok(OperationOutcome::Updated(Account::new(54321, Decimal::new(150, 0)))), (1, 0, 0))]
    #[case::not_found(Err(LedgerError::account_not_found(54321)), (0, 1, 0))]
    #[case::insufficient_funds(
        Err(LedgerError::insufficient_funds(54321, Decimal::ONE, Decimal::TEN)),
        (0, 1, 0)
    )]
    #[case::storage(Err(LedgerError::storage("database is locked")), (0, 0, 1))]
    #[case::overflow(Err(LedgerError::arithmetic_overflow("deposit", 54321)), (0, 0, 1))]
    #[case::task_failed(Err(LedgerError::TaskFailed { message: "panicked".to_string() }), (0, 0, 1))]
    fn test_summary_separates_rejections_from_failures(
        #[case] result: Result<OperationOutcome, LedgerError>,
        #[case] expected: (usize, usize, usize),
    ) {
        let mut summary = ProcessingSummary::default();

        summary.record(&withdrawal(), &result);

        assert_eq!((summary.applied, summary.rejected, summary.failed), expected);
        assert_eq!(summary.total(), 1);
    }
}

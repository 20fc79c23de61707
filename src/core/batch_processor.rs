//! Batch processing with account-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which applies a batch of
//! script operations with operations on different accounts running in
//! parallel and operations on the same account running in file order.
//!
//! ```text
//! BatchProcessor
//!     └── AccountLedger (shared, cheap to clone)
//! ```
//!
//! Ledger calls may block on storage I/O, so each partition runs on the
//! tokio blocking pool rather than on an async worker.

use std::collections::HashMap;

use crate::core::AccountLedger;
use crate::types::{AccountNumber, LedgerError, OperationOutcome, OperationRecord};

/// Result of applying a single operation
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation that was applied
    pub record: OperationRecord,

    /// What the ledger returned
    pub result: Result<OperationOutcome, LedgerError>,
}

/// Batch processor with account-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    ledger: AccountLedger,
}

impl BatchProcessor {
    /// Create a new BatchProcessor over a ledger
    pub fn new(ledger: AccountLedger) -> Self {
        Self { ledger }
    }

    /// Split a batch into per-account sub-batches
    ///
    /// Each operation lands in exactly one sub-batch and every sub-batch keeps
    /// the original relative order of its operations.
    pub fn partition_by_account(
        &self,
        batch: Vec<OperationRecord>,
    ) -> HashMap<AccountNumber, Vec<OperationRecord>> {
        let mut account_batches: HashMap<AccountNumber, Vec<OperationRecord>> = HashMap::new();

        for record in batch {
            account_batches
                .entry(record.account)
                .or_default()
                .push(record);
        }

        account_batches
    }

    /// Apply one account's operations sequentially
    ///
    /// Failures are captured in the results and do not stop later operations.
    pub fn process_account_operations(
        &self,
        operations: Vec<OperationRecord>,
    ) -> Vec<ProcessingResult> {
        operations
            .into_iter()
            .map(|record| {
                let result = self.ledger.apply(&record);
                ProcessingResult { record, result }
            })
            .collect()
    }

    /// Apply a batch, one blocking task per account
    ///
    /// Waits for every task before returning, so the next batch never
    /// overtakes this one. Result order across accounts is unspecified.
    ///
    /// Every operation in the batch yields exactly one result. If a task dies
    /// (panic or cancellation), each of its operations is reported as
    /// `TaskFailed`; whether any of them reached the store is unknown.
    pub async fn process_batch(&self, batch: Vec<OperationRecord>) -> Vec<ProcessingResult> {
        let account_batches = self.partition_by_account(batch);

        let mut tasks = Vec::with_capacity(account_batches.len());
        for (account, operations) in account_batches {
            let processor = self.clone();
            let submitted = operations.clone();
            let task = tokio::task::spawn_blocking(move || {
                processor.process_account_operations(operations)
            });
            tasks.push((account, submitted, task));
        }

        let mut results = Vec::new();
        for (account, submitted, task) in tasks {
            match task.await {
                Ok(account_results) => results.extend(account_results),
                Err(e) => {
                    tracing::error!(
                        account,
                        operations = submitted.len(),
                        "Partition task failed: {:?}",
                        e
                    );
                    let error = LedgerError::TaskFailed {
                        message: format!("partition for account {} failed: {}", account, e),
                    };
                    results.extend(submitted.into_iter().map(|record| ProcessingResult {
                        record,
                        result: Err(error.clone()),
                    }));
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{AccountStore, ApplyFn};
    use crate::core::MemoryAccountStore;
    use crate::types::{Account, OperationType, SEED_ACCOUNT};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn seeded_processor() -> (AccountLedger, BatchProcessor) {
        let ledger = AccountLedger::new(Arc::new(MemoryAccountStore::new()));
        ledger.ensure_seed().unwrap();
        (ledger.clone(), BatchProcessor::new(ledger))
    }

    fn op(op: OperationType, account: AccountNumber, amount: i64) -> OperationRecord {
        OperationRecord {
            op,
            account,
            amount: Some(Decimal::new(amount, 0)),
        }
    }

    #[test]
    fn test_partition_preserves_per_account_order() {
        let (_ledger, processor) = seeded_processor();
        let batch = vec![
            op(OperationType::Deposit, 1, 10),
            op(OperationType::Deposit, 2, 20),
            op(OperationType::Withdraw, 1, 5),
            op(OperationType::Balance, 2, 0),
        ];

        let partitions = processor.partition_by_account(batch);

        assert_eq!(partitions.len(), 2);
        let first: Vec<OperationType> = partitions[&1].iter().map(|r| r.op).collect();
        assert_eq!(first, vec![OperationType::Deposit, OperationType::Withdraw]);
        let second: Vec<OperationType> = partitions[&2].iter().map(|r| r.op).collect();
        assert_eq!(second, vec![OperationType::Deposit, OperationType::Balance]);
    }

    #[test]
    fn test_process_account_operations_continues_after_failure() {
        let (ledger, processor) = seeded_processor();

        let results = processor.process_account_operations(vec![
            op(OperationType::Withdraw, SEED_ACCOUNT, 1000),
            op(OperationType::Withdraw, SEED_ACCOUNT, 60),
        ]);

        assert_eq!(results.len(), 2);
        assert!(matches!(
            results[0].result,
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert!(results[1].result.is_ok());
        assert_eq!(ledger.get_balance(SEED_ACCOUNT).unwrap(), Decimal::new(100, 0));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_process_batch_applies_every_operation() {
        let (ledger, processor) = seeded_processor();
        ledger.open_account(1, Decimal::ZERO).unwrap();

        let results = processor
            .process_batch(vec![
                op(OperationType::Deposit, 1, 10),
                op(OperationType::Withdraw, SEED_ACCOUNT, 140),
                op(OperationType::Withdraw, 1, 4),
                op(OperationType::Deposit, SEED_ACCOUNT, 300),
                op(OperationType::Balance, 99999, 0),
            ])
            .await;

        assert_eq!(results.len(), 5);
        assert_eq!(
            results.iter().filter(|r| r.result.is_err()).count(),
            1,
            "only the unknown account should fail"
        );
        assert_eq!(ledger.get_balance(1).unwrap(), Decimal::new(6, 0));
        assert_eq!(ledger.get_balance(SEED_ACCOUNT).unwrap(), Decimal::new(320, 0));
    }

    /// Store whose every call panics, standing in for a crashed worker
    struct PanickingStore;

    impl AccountStore for PanickingStore {
        fn find(&self, _number: AccountNumber) -> Result<Option<Account>, LedgerError> {
            panic!("store unavailable")
        }

        fn update(
            &self,
            _number: AccountNumber,
            _apply: &mut ApplyFn<'_>,
        ) -> Result<Option<Account>, LedgerError> {
            panic!("store unavailable")
        }

        fn insert(&self, _account: &Account) -> Result<(), LedgerError> {
            panic!("store unavailable")
        }

        fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
            panic!("store unavailable")
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_partition_reports_every_operation() {
        let processor = BatchProcessor::new(AccountLedger::new(Arc::new(PanickingStore)));

        let results = processor
            .process_batch(vec![
                op(OperationType::Deposit, 1, 10),
                op(OperationType::Withdraw, 1, 5),
                op(OperationType::Balance, 2, 0),
            ])
            .await;

        assert_eq!(results.len(), 3);
        assert!(results
            .iter()
            .all(|r| matches!(r.result, Err(LedgerError::TaskFailed { .. }))));
        let mut accounts: Vec<AccountNumber> = results.iter().map(|r| r.record.account).collect();
        accounts.sort();
        assert_eq!(accounts, vec![1, 1, 2]);
    }
}

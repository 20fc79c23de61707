//! Benchmark suite for comparing processing strategies
//!
//! This benchmark compares the performance of synchronous and asynchronous
//! processing strategies using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Generated Scripts
//!
//! Scripts are generated into a temporary file before each benchmark, with
//! 100, 1,000 and 100,000 operations spread over 64 accounts. Each script
//! mixes deposits, withdrawals (some rejected) and balance queries.

use account_ledger::cli::StrategyType;
use account_ledger::core::{AccountLedger, MemoryAccountStore};
use account_ledger::strategy::{create_strategy, BatchConfig};
use divan::Bencher;
use rust_decimal::Decimal;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const ACCOUNTS: i32 = 64;

fn main() {
    divan::main();
}

fn generate_script(operations: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "op,account,amount").expect("Failed to write header");

    for i in 0..operations {
        let account = 1000 + (i as i32 % ACCOUNTS);
        match i % 3 {
            0 => writeln!(file, "deposit,{},{}.25", account, i % 50),
            1 => writeln!(file, "withdraw,{},{}.10", account, i % 70),
            _ => writeln!(file, "balance,{},", account),
        }
        .expect("Failed to write operation");
    }

    file.flush().expect("Failed to flush temp file");
    file
}

fn fresh_ledger() -> AccountLedger {
    let ledger = AccountLedger::new(Arc::new(MemoryAccountStore::new()));
    for number in 1000..1000 + ACCOUNTS {
        ledger
            .open_account(number, Decimal::new(100, 0))
            .expect("Failed to open account");
    }
    ledger
}

fn run(bencher: Bencher, operations: usize, strategy_type: StrategyType) {
    let script = generate_script(operations);
    let config = match strategy_type {
        StrategyType::Sync => None,
        StrategyType::Async => Some(BatchConfig::default()),
    };
    let strategy = create_strategy(strategy_type, config);

    bencher.with_inputs(fresh_ledger).bench_local_values(|ledger| {
        let mut output = Vec::new();
        strategy
            .process(&ledger, script.path(), &mut output)
            .expect("Processing failed");
        output
    });
}

/// Benchmark synchronous processing strategy
#[divan::bench(args = [100, 1_000, 100_000])]
fn sync_strategy(bencher: Bencher, operations: usize) {
    run(bencher, operations, StrategyType::Sync);
}

/// Benchmark asynchronous processing strategy
#[divan::bench(args = [100, 1_000, 100_000])]
fn async_strategy(bencher: Bencher, operations: usize) {
    run(bencher, operations, StrategyType::Async);
}

//! End-to-end integration tests
//!
//! These tests validate the complete script processing pipeline using
//! predefined CSV test fixtures. Each test:
//! 1. Seeds a fresh ledger (plus any extra accounts the fixture needs)
//! 2. Applies input.csv from a fixture directory
//! 3. Writes every account as CSV
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - The default account scenario
//! - Unknown accounts and insufficient funds
//! - Fractional (including sub-cent) and negative amounts
//! - Malformed rows and loose formatting
//!
//! Each fixture is run with both strategies, on both the in-memory and the
//! SQLite store.

#[cfg(test)]
mod tests {
    use account_ledger::cli::StrategyType;
    use account_ledger::core::{AccountLedger, AccountStore, MemoryAccountStore, SqliteAccountStore};
    use account_ledger::strategy::create_strategy;
    use account_ledger::AccountNumber;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Copy)]
    enum Backend {
        Memory,
        Sqlite,
    }

    /// Run a test fixture by processing input.csv and comparing with expected.csv
    ///
    /// `extra_accounts` are opened with a zero balance next to the default
    /// account before the script runs.
    fn run_test_fixture(
        fixture_name: &str,
        extra_accounts: &[AccountNumber],
        strategy_type: StrategyType,
        backend: Backend,
    ) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );

        // Keeps the database file alive for the duration of the test
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store: Arc<dyn AccountStore> = match backend {
            Backend::Memory => Arc::new(MemoryAccountStore::new()),
            Backend::Sqlite => Arc::new(
                SqliteAccountStore::open(dir.path().join("ledger.db"))
                    .expect("Failed to open SQLite store"),
            ),
        };
        let ledger = AccountLedger::new(store);
        ledger.ensure_seed().expect("Failed to seed ledger");
        for &number in extra_accounts {
            ledger
                .open_account(number, Decimal::ZERO)
                .expect("Failed to open account");
        }

        let strategy = create_strategy(strategy_type.clone(), None);
        let mut output = Vec::new();

        strategy
            .process(&ledger, Path::new(&input_path), &mut output)
            .unwrap_or_else(|e| panic!("Failed to process script: {}", e));

        let actual_output = String::from_utf8(output).expect("Output is not UTF-8");
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?}, backend: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, backend, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("seed_scenario", &[])]
    #[case("unknown_account", &[])]
    #[case("insufficient_funds", &[])]
    #[case("fractional_amounts", &[])]
    #[case("sub_cent_amounts", &[])]
    #[case("sub_cent_settles", &[])]
    #[case("negative_amounts", &[])]
    #[case("malformed_rows", &[])]
    #[case("whitespace_and_case", &[])]
    #[case("multiple_accounts", &[1001, 1002])]
    #[case("empty_script", &[])]
    fn test_fixtures(
        #[case] fixture: &str,
        #[case] extra_accounts: &[AccountNumber],
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
        #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
    ) {
        run_test_fixture(fixture, extra_accounts, strategy, backend);
    }
}

//! Command dispatch
//!
//! Turns parsed arguments into ledger calls and renders their results.
//! Single-account results are written as one JSON object per line; account
//! listings are written as CSV.

use crate::cli::{batch_config, CliArgs, Command, StrategyType};
use crate::core::{open_store, AccountLedger};
use crate::io::write_accounts_csv;
use crate::strategy::create_strategy;
use crate::types::LedgerError;
use serde::Serialize;
use serde_json::json;
use std::io::Write;

fn write_json(output: &mut dyn Write, value: &impl Serialize) -> Result<(), LedgerError> {
    serde_json::to_writer(&mut *output, value).map_err(|e| LedgerError::IoError {
        message: e.to_string(),
    })?;
    writeln!(output)?;
    Ok(())
}

/// Structured rendering of a failure: `{"error":{"kind":..,"message":..}}`
pub fn render_error(error: &LedgerError) -> serde_json::Value {
    json!({
        "error": {
            "kind": error.kind(),
            "message": error.to_string(),
        }
    })
}

/// Open the configured store, seed it, and run the requested command
pub fn execute(args: CliArgs, output: &mut dyn Write) -> Result<(), LedgerError> {
    let store = open_store(args.database.as_deref())?;
    let ledger = AccountLedger::new(store);

    if !args.no_seed {
        ledger.ensure_seed()?;
    }

    match args.command {
        Command::Balance { account } => {
            let balance = ledger.get_balance(account)?;
            write_json(output, &json!({ "balance": balance }))
        }
        Command::Deposit { account, amount } => {
            let account = ledger.deposit(account, amount)?;
            write_json(output, &account)
        }
        Command::Withdraw { account, amount } => {
            let account = ledger.withdraw(account, amount)?;
            write_json(output, &account)
        }
        Command::Open { account, balance } => {
            let account = ledger.open_account(account, balance)?;
            write_json(output, &account)
        }
        Command::List => write_accounts_csv(&ledger.accounts()?, output),
        Command::Run {
            input_file,
            strategy,
            batch_size,
            max_concurrent_batches,
        } => {
            let config = if strategy == StrategyType::Async {
                Some(batch_config(batch_size, max_concurrent_batches))
            } else {
                None
            };
            create_strategy(strategy, config)
                .process(&ledger, &input_file, output)
                .map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn run(args: &[&str]) -> Result<String, LedgerError> {
        let args = CliArgs::try_parse_from(args).unwrap();
        let mut output = Vec::new();
        execute(args, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_balance_of_seed_account() {
        let output = run(&["program", "balance", "--account", "54321"]).unwrap();
        assert_eq!(output, "{\"balance\":\"160\"}\n");
    }

    #[test]
    fn test_withdraw_renders_account() {
        let output = run(&["program", "withdraw", "--account", "54321", "--amount", "140"]).unwrap();
        assert_eq!(output, "{\"number\":54321,\"balance\":\"20\"}\n");
    }

    #[test]
    fn test_unknown_account_without_seed() {
        let result = run(&["program", "--no-seed", "balance", "--account", "54321"]);
        assert_eq!(result, Err(LedgerError::AccountNotFound { account: 54321 }));
    }

    #[test]
    fn test_render_error_carries_kind_and_message() {
        let error = LedgerError::insufficient_funds(
            54321,
            rust_decimal::Decimal::new(320, 0),
            rust_decimal::Decimal::new(1000, 0),
        );

        let rendered = render_error(&error);

        assert_eq!(rendered["error"]["kind"], "InsufficientFunds");
        assert_eq!(
            rendered["error"]["message"],
            "Insufficient funds for account 54321: balance 320, requested 1000"
        );
    }

    #[test]
    fn test_state_persists_across_invocations_with_database() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("ledger.db");
        let db = db.to_str().unwrap();

        run(&["program", "--database", db, "withdraw", "--account", "54321", "--amount", "140"])
            .unwrap();
        run(&["program", "--database", db, "deposit", "--account", "54321", "--amount", "300"])
            .unwrap();
        let result = run(&[
            "program", "--database", db, "withdraw", "--account", "54321", "--amount", "1000",
        ]);

        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        let listing = run(&["program", "--database", db, "list"]).unwrap();
        assert_eq!(listing, "account,balance\n54321,320.00\n");
    }
}

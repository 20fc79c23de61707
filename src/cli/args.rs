use crate::strategy::BatchConfig;
use crate::types::AccountNumber;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Query and update account balances
#[derive(Parser, Debug)]
#[command(name = "account-ledger")]
#[command(about = "Query and update account balances", long_about = None)]
pub struct CliArgs {
    /// SQLite database file; the in-memory store is used when absent
    #[arg(
        long = "database",
        value_name = "PATH",
        env = "LEDGER_DATABASE",
        global = true
    )]
    pub database: Option<PathBuf>,

    /// Do not provision the default account at startup
    #[arg(long = "no-seed", global = true)]
    pub no_seed: bool,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Ledger operations exposed on the command line
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the balance of an account
    Balance {
        #[arg(long, value_name = "NUMBER")]
        account: AccountNumber,
    },

    /// Add an amount to an account
    Deposit {
        #[arg(long, value_name = "NUMBER")]
        account: AccountNumber,
        #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: Decimal,
    },

    /// Subtract an amount from an account
    Withdraw {
        #[arg(long, value_name = "NUMBER")]
        account: AccountNumber,
        #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: Decimal,
    },

    /// Create an account
    Open {
        #[arg(long, value_name = "NUMBER")]
        account: AccountNumber,
        #[arg(
            long,
            value_name = "AMOUNT",
            default_value = "0",
            allow_hyphen_values = true
        )]
        balance: Decimal,
    },

    /// Print every account as CSV
    List,

    /// Apply an operation script and print every account as CSV
    Run {
        /// Script with columns op,account,amount
        #[arg(value_name = "INPUT")]
        input_file: PathBuf,

        /// Processing strategy to use
        #[arg(
            long = "strategy",
            value_name = "STRATEGY",
            default_value = "sync",
            help = "Processing strategy: 'sync' for in-order or 'async' for account-parallel"
        )]
        strategy: StrategyType,

        /// Number of operations per batch (async mode only)
        #[arg(
            long = "batch-size",
            value_name = "SIZE",
            help = "Number of operations per batch (default: 1000)"
        )]
        batch_size: Option<usize>,

        /// Maximum number of accounts processed concurrently (async mode only)
        #[arg(
            long = "max-concurrent",
            value_name = "COUNT",
            help = "Maximum number of accounts processed concurrently (default: CPU cores)"
        )]
        max_concurrent_batches: Option<usize>,
    },
}

/// Available processing strategies for operation scripts
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Build a BatchConfig from optional CLI overrides
pub fn batch_config(batch_size: Option<usize>, max_concurrent: Option<usize>) -> BatchConfig {
    if batch_size.is_some() || max_concurrent.is_some() {
        let default = BatchConfig::default();
        BatchConfig::new(
            batch_size.unwrap_or(default.batch_size),
            max_concurrent.unwrap_or(default.max_concurrent_batches),
        )
    } else {
        BatchConfig::default()
    }
}

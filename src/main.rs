//! Account Ledger CLI
//!
//! Command-line interface for querying and updating account balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- balance --account 54321
//! cargo run -- withdraw --account 54321 --amount 140
//! cargo run -- --database ledger.db deposit --account 54321 --amount 300
//! cargo run -- run --strategy async --batch-size 2000 operations.csv > accounts.csv
//! ```
//!
//! Without `--database` (or `LEDGER_DATABASE`) every invocation starts from
//! a fresh in-memory store holding only the default account.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unknown account, insufficient funds, file not found, storage failure, etc.)

use account_ledger::{cli, logging};
use std::process;

fn main() {
    let args = cli::parse_args();
    logging::init(args.log_json);

    let mut output = std::io::stdout();
    if let Err(e) = cli::execute(args, &mut output) {
        if e.is_domain() {
            tracing::warn!(kind = e.kind(), "{}", e);
        } else {
            tracing::error!(kind = e.kind(), "{}", e);
        }
        println!("{}", cli::render_error(&e));
        process::exit(1);
    }
}

// CLI module
// Command-line interface and argument parsing

mod args;
mod commands;

pub use args::{batch_config, CliArgs, Command, StrategyType};
pub use commands::{execute, render_error};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

//! CSV format handling for operation scripts and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Account output serialization
//!
//! All functions are pure (no I/O beyond the writer they are handed).

use crate::types::{Account, AccountNumber, LedgerError, OperationRecord, OperationType};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the script format with columns: op, account, amount.
/// The amount is optional because balance queries don't carry one.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub account: AccountNumber,
    pub amount: Option<String>,
}

fn parse_error(message: String) -> LedgerError {
    LedgerError::ParseError {
        line: None,
        message,
    }
}

/// Convert a CsvRecord to an OperationRecord
///
/// Parses the operation name (case-insensitive) and the amount, and checks
/// that deposits and withdrawals carry an amount. Amounts are not otherwise
/// validated: zero and negative values pass through.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<OperationRecord, LedgerError> {
    let op = match csv_record.op.to_lowercase().as_str() {
        "balance" => OperationType::Balance,
        "deposit" => OperationType::Deposit,
        "withdraw" => OperationType::Withdraw,
        _ => {
            return Err(parse_error(format!(
                "Invalid operation '{}' for account {}",
                csv_record.op, csv_record.account
            )))
        }
    };

    let amount = match csv_record.amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            match Decimal::from_str(amount_str.trim()) {
                Ok(decimal) => Some(decimal),
                Err(_) => {
                    return Err(parse_error(format!(
                        "Invalid amount '{}' for account {}",
                        amount_str, csv_record.account
                    )))
                }
            }
        }
        _ => None,
    };

    match op {
        OperationType::Deposit | OperationType::Withdraw if amount.is_none() => {
            return Err(parse_error(format!(
                "{} on account {} requires an amount",
                op.as_str(),
                csv_record.account
            )));
        }
        // Balance queries ignore any amount provided
        _ => {}
    }

    Ok(OperationRecord {
        op,
        account: csv_record.account,
        amount,
    })
}

/// Render a balance for the account listing
///
/// Balances with at most two significant fractional digits are padded to
/// two (`160` -> `160.00`). Finer balances are written in full so the
/// listing never rounds away what the store holds.
pub fn format_balance(balance: Decimal) -> String {
    let normalized = balance.normalize();
    if normalized.scale() <= 2 {
        format!("{:.2}", normalized)
    } else {
        normalized.to_string()
    }
}

/// Write account states to CSV format
///
/// Writes columns `account,balance`, sorted by account number, with the
/// balance rendered by [`format_balance`].
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(["account", "balance"])?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.number);

    for account in sorted_accounts {
        writer.write_record(&[account.number.to_string(), format_balance(account.balance)])?;
    }

    writer.flush()?;

    Ok(())
}

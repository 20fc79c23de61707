//! Error types for the account ledger
//!
//! This module defines every error the ledger and its collaborators can report.
//!
//! # Error Categories
//!
//! - **Domain Errors**: Account not found, insufficient funds
//! - **Creation Errors**: Account already exists
//! - **Arithmetic Errors**: Balance outside the representable decimal range
//! - **Infrastructure Errors**: Storage failures, file I/O, worker tasks, script parsing
//!
//! Infrastructure errors are passed through as-is and never mapped onto a
//! domain kind.

use crate::types::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
///
/// Callers branch on the variant (or on [`LedgerError::kind`]) rather than
/// on the message text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No account exists with the requested number
    ///
    /// Raised by every operation on a lookup miss. Nothing is written.
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The account number that was looked up
        account: AccountNumber,
    },

    /// Withdrawal amount exceeds the current balance
    ///
    /// The stored balance is left unchanged when this is returned.
    #[error("Insufficient funds for account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account number
        account: AccountNumber,
        /// Balance at the time of the check
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// An account with this number already exists
    #[error("Account {account} already exists")]
    AccountAlreadyExists {
        /// The conflicting account number
        account: AccountNumber,
    },

    /// The new balance cannot be represented
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account number
        account: AccountNumber,
    },

    /// The storage backend failed
    #[error("Storage error: {message}")]
    Storage {
        /// Description reported by the backend
        message: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A worker applying script operations died before reporting results
    #[error("Task failed: {message}")]
    TaskFailed {
        /// Why the task ended
        message: String,
    },

    /// Script parsing error
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(error: rusqlite::Error) -> Self {
        LedgerError::storage(error)
    }
}

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountNumber) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountNumber, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create an AccountAlreadyExists error
    pub fn account_already_exists(account: AccountNumber) -> Self {
        LedgerError::AccountAlreadyExists { account }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountNumber) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create a Storage error from any backend error
    pub fn storage(error: impl std::fmt::Display) -> Self {
        LedgerError::Storage {
            message: error.to_string(),
        }
    }

    /// Variant tag, stable across message wording changes
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::AccountNotFound { .. } => "AccountNotFound",
            LedgerError::InsufficientFunds { .. } => "InsufficientFunds",
            LedgerError::AccountAlreadyExists { .. } => "AccountAlreadyExists",
            LedgerError::ArithmeticOverflow { .. } => "ArithmeticOverflow",
            LedgerError::Storage { .. } => "Storage",
            LedgerError::FileNotFound { .. } => "FileNotFound",
            LedgerError::IoError { .. } => "IoError",
            LedgerError::TaskFailed { .. } => "TaskFailed",
            LedgerError::ParseError { .. } => "ParseError",
        }
    }

    /// Whether this is one of the two domain failures
    ///
    /// Domain failures are expected outcomes of a valid request; everything
    /// else means the request could not be evaluated.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            LedgerError::AccountNotFound { .. } | LedgerError::InsufficientFunds { .. }
        )
    }
}

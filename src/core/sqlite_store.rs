//! SQLite-backed account storage
//!
//! Each call opens its own connection and drops it before returning, so a
//! session never outlives the operation that needed it. Balances are stored
//! as decimal text to keep every fractional digit exact.
//!
//! `update` runs inside a `BEGIN IMMEDIATE` transaction: the write lock is
//! taken before the balance is read, which serializes concurrent
//! read-check-write sequences across connections and processes.

use crate::core::traits::{AccountStore, ApplyFn};
use crate::types::{Account, AccountNumber, LedgerError};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, TransactionBehavior};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// How long a connection waits for a competing writer before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Account store persisted in a SQLite database file
#[derive(Debug, Clone)]
pub struct SqliteAccountStore {
    path: PathBuf,
}

impl SqliteAccountStore {
    /// Open (creating if needed) the database at `path` and ensure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };

        let conn = store.connect()?;
        setup_schema(&conn)?;
        tracing::debug!(path = %store.path.display(), "SQLite account store ready");

        Ok(store)
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, LedgerError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

/// Create the accounts table if it does not exist
pub fn setup_schema(conn: &Connection) -> Result<(), LedgerError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
            number  INTEGER PRIMARY KEY,
            balance TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

fn parse_balance(number: AccountNumber, text: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str(text).map_err(|e| {
        LedgerError::storage(format!(
            "corrupt balance '{}' for account {}: {}",
            text, number, e
        ))
    })
}

fn load(conn: &Connection, number: AccountNumber) -> Result<Option<Account>, LedgerError> {
    let balance: Option<String> = conn
        .query_row(
            "SELECT balance FROM accounts WHERE number = ?1",
            params![number],
            |row| row.get(0),
        )
        .optional()?;

    match balance {
        Some(text) => Ok(Some(Account::new(number, parse_balance(number, &text)?))),
        None => Ok(None),
    }
}

impl AccountStore for SqliteAccountStore {
    fn find(&self, number: AccountNumber) -> Result<Option<Account>, LedgerError> {
        let conn = self.connect()?;
        load(&conn, number)
    }

    fn update(
        &self,
        number: AccountNumber,
        apply: &mut ApplyFn<'_>,
    ) -> Result<Option<Account>, LedgerError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Dropping `tx` on any early return rolls the transaction back
        let Some(mut account) = load(&tx, number)? else {
            return Ok(None);
        };
        apply(&mut account)?;

        tx.execute(
            "UPDATE accounts SET balance = ?1 WHERE number = ?2",
            params![account.balance.to_string(), number],
        )?;
        tx.commit()?;

        Ok(Some(account))
    }

    fn insert(&self, account: &Account) -> Result<(), LedgerError> {
        let conn = self.connect()?;
        let result = conn.execute(
            "INSERT INTO accounts (number, balance) VALUES (?1, ?2)",
            params![account.number, account.balance.to_string()],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(LedgerError::account_already_exists(account.number))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT number, balance FROM accounts ORDER BY number")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, AccountNumber>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut accounts = Vec::new();
        for row in rows {
            let (number, text) = row?;
            accounts.push(Account::new(number, parse_balance(number, &text)?));
        }

        Ok(accounts)
    }
}

//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over operation records from a script file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as `Err` items carrying the line number
//!
//! Records are read one at a time; the file is never loaded whole.

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{LedgerError, OperationRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
///
/// ```no_run
/// use account_ledger::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::new(Path::new("operations.csv")).unwrap();
/// let records: Vec<_> = reader.filter_map(Result::ok).collect();
/// println!("Parsed {} operations", records.len());
/// ```
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
}

impl SyncReader {
    /// Open a script file for streaming iteration
    ///
    /// The reader trims whitespace from all fields and tolerates a missing
    /// trailing amount column.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LedgerError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LedgerError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        Ok(Self { reader, headers })
    }
}

fn with_line(error: LedgerError, line: Option<u64>) -> LedgerError {
    match error {
        LedgerError::ParseError {
            message,
            line: parsed_line,
        } => LedgerError::ParseError {
            line: line.or(parsed_line),
            message,
        },
        other => other,
    }
}

impl Iterator for SyncReader {
    type Item = Result<OperationRecord, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut raw = StringRecord::new();

        match self.reader.read_record(&mut raw) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => return Some(Err(e.into())),
        }

        // Line where the record starts in the file, so skipped blank lines
        // and quoted newlines are accounted for
        let line = raw.position().map(|pos| pos.line());

        let result = raw
            .deserialize::<CsvRecord>(Some(&self.headers))
            .map_err(LedgerError::from)
            .and_then(convert_csv_record);

        Some(result.map_err(|e| with_line(e, line)))
    }
}

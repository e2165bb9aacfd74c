//! Expense record persistence
//!
//! The sheet composer only ever needs two operations from the record store:
//! list everything and append one record. Both backends implement that
//! contract: a JSON file store for the CLI and an in-memory store with an
//! explicit lifecycle, used in tests.

use std::path::PathBuf;

use crate::error::ExpenseResult;
use crate::models::ExpenseRecord;

use super::file_io::{read_json, write_json_atomic};

/// Read/append access to the full set of expense records
///
/// Implementations own the records; callers receive immutable snapshots.
pub trait ExpenseStore {
    /// All records, in stored order
    fn list(&self) -> ExpenseResult<Vec<ExpenseRecord>>;

    /// Append a single record
    fn append(&mut self, record: ExpenseRecord) -> ExpenseResult<()>;
}

/// JSON-file-backed expense store (expenses.json)
///
/// A missing file reads as an empty list; every append rewrites the file
/// atomically.
pub struct JsonExpenseStore {
    path: PathBuf,
}

impl JsonExpenseStore {
    /// Create a store backed by the given JSON file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path to the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ExpenseStore for JsonExpenseStore {
    fn list(&self) -> ExpenseResult<Vec<ExpenseRecord>> {
        read_json(&self.path)
    }

    fn append(&mut self, record: ExpenseRecord) -> ExpenseResult<()> {
        let mut records: Vec<ExpenseRecord> = read_json(&self.path)?;
        records.push(record);
        write_json_atomic(&self.path, &records)
    }
}

/// In-memory expense store
///
/// Holds records in an explicit instance rather than shared module state, so
/// each store has a defined init/read/append lifecycle.
#[derive(Debug, Default)]
pub struct MemoryExpenseStore {
    records: Vec<ExpenseRecord>,
}

impl MemoryExpenseStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }
}

impl ExpenseStore for MemoryExpenseStore {
    fn list(&self) -> ExpenseResult<Vec<ExpenseRecord>> {
        Ok(self.records.clone())
    }

    fn append(&mut self, record: ExpenseRecord) -> ExpenseResult<()> {
        self.records.push(record);
        Ok(())
    }
}

//! Storage layer for ReceiptBook
//!
//! Provides JSON file storage with atomic writes for expense records, and a
//! root-restricted store for receipt image files.

pub mod expenses;
pub mod file_io;
pub mod receipts;

pub use expenses::{ExpenseStore, JsonExpenseStore, MemoryExpenseStore};
pub use file_io::{read_json, write_json_atomic};
pub use receipts::ReceiptStore;

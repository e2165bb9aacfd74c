//! Core data models for ReceiptBook
//!
//! This module contains the data structures that represent the expense
//! domain: expense records, monetary amounts, and identifiers.

pub mod expense;
pub mod ids;
pub mod money;

pub use expense::{ExpenseRecord, NewExpense};
pub use ids::ExpenseId;
pub use money::Money;

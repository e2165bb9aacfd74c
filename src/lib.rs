//! ReceiptBook - expense tracking with printable PDF receipt sheets
//!
//! This library provides the core functionality for the ReceiptBook CLI: a
//! JSON-backed expense store with optional receipt-image attachments, and a
//! batch composer that lays the stored receipt images into paginated,
//! printable PDF sheets grouped by (month, expense type).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expense records, money, identifiers)
//! - `storage`: JSON file storage and the receipt image store
//! - `sheets`: Receipt sheet composition (grouping, grid layout, image
//!   fitting, PDF assembly, batch driver)
//! - `cli`: Command handlers

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod sheets;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};

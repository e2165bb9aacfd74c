//! Custom error types for ReceiptBook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ReceiptBook operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A receipt reference did not resolve to a readable image file
    #[error("Receipt image not found: {reference}")]
    ImageNotFound { reference: String },

    /// Receipt image bytes could not be decoded, or decoded to unusable
    /// natural dimensions
    #[error("Failed to decode receipt image {reference}: {detail}")]
    ImageDecode { reference: String, detail: String },

    /// PDF assembly or serialization errors
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Batch-run errors
    #[error("Batch error: {0}")]
    Batch(String),
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Convenience result alias used throughout the crate
pub type ExpenseResult<T> = Result<T, ExpenseError>;

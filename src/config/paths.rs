//! Path management for ReceiptBook
//!
//! Provides XDG-compliant path resolution for expense data, receipt images,
//! and generated PDF sheets.
//!
//! ## Path Resolution Order
//!
//! 1. `RECEIPTBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/receiptbook` or `~/.config/receiptbook`
//! 3. Windows: `%APPDATA%\receiptbook`

use std::path::PathBuf;

use crate::error::ExpenseError;

/// Manages all paths used by ReceiptBook
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Base directory for all ReceiptBook data
    base_dir: PathBuf,
}

impl AppPaths {
    /// Create a new AppPaths instance
    ///
    /// Path resolution:
    /// 1. `RECEIPTBOOK_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/receiptbook` or `~/.config/receiptbook`
    /// 3. Windows: `%APPDATA%\receiptbook`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ExpenseError> {
        let base_dir = if let Ok(custom) = std::env::var("RECEIPTBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create AppPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/receiptbook/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/receiptbook/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Get the directory where receipt images are stored
    pub fn receipts_dir(&self) -> PathBuf {
        self.base_dir.join("receipts")
    }

    /// Get the default directory for generated PDF sheets
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join("pdf-output")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory (~/.config/receiptbook/)
    /// - Data directory (~/.config/receiptbook/data/)
    /// - Receipts directory (~/.config/receiptbook/receipts/)
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| ExpenseError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.receipts_dir())
            .map_err(|e| ExpenseError::Io(format!("Failed to create receipts directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                ExpenseError::Config("Could not determine home directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("receiptbook"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ExpenseError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("receiptbook"))
}

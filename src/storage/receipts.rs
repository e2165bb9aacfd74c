//! Receipt image store
//!
//! Resolves opaque receipt references (as stored on expense records, e.g.
//! `/receipts/receipt-xyz.jpg`) to image files under a single allowed root
//! directory. Lookups canonicalize the resolved path and reject anything that
//! escapes the root, so a hostile reference can never read outside it.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use uuid::Uuid;

use crate::error::{ExpenseError, ExpenseResult};

/// URL-style prefix receipt references have always carried
const REFERENCE_PREFIX: &str = "/receipts/";

/// Read-only store of receipt image files under one root directory
#[derive(Debug, Clone)]
pub struct ReceiptStore {
    /// Canonicalized root; all lookups must resolve inside it
    root: PathBuf,
}

impl ReceiptStore {
    /// Open a receipt store rooted at the given directory, creating it if
    /// needed. The root is canonicalized once here so later containment
    /// checks compare resolved paths.
    pub fn open(root: impl AsRef<Path>) -> ExpenseResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root).map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to create receipts directory {}: {}",
                root.display(),
                e
            ))
        })?;
        let root = root.canonicalize().map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to resolve receipts directory {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    /// The canonicalized root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a reference to a file path inside the root
    ///
    /// Fails with `ImageNotFound` if the file does not exist or the reference
    /// resolves outside the root.
    fn resolve(&self, reference: &str) -> ExpenseResult<PathBuf> {
        let relative = reference.strip_prefix(REFERENCE_PREFIX).unwrap_or(reference);
        let candidate = self.root.join(relative);

        // Canonicalize resolves symlinks and `..` components; a missing file
        // errors here, which is exactly the NotFound case.
        let resolved = candidate.canonicalize().map_err(|_| ExpenseError::ImageNotFound {
            reference: reference.to_string(),
        })?;

        if !resolved.starts_with(&self.root) {
            return Err(ExpenseError::ImageNotFound {
                reference: reference.to_string(),
            });
        }

        Ok(resolved)
    }

    /// Read the raw bytes for a receipt reference
    pub fn read(&self, reference: &str) -> ExpenseResult<Vec<u8>> {
        let path = self.resolve(reference)?;
        fs::read(&path).map_err(|_| ExpenseError::ImageNotFound {
            reference: reference.to_string(),
        })
    }

    /// Read the natural (width, height) of image bytes without a full decode
    pub fn dimensions(&self, reference: &str, bytes: &[u8]) -> ExpenseResult<(u32, u32)> {
        image::io::Reader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ExpenseError::ImageDecode {
                reference: reference.to_string(),
                detail: e.to_string(),
            })?
            .into_dimensions()
            .map_err(|e| ExpenseError::ImageDecode {
                reference: reference.to_string(),
                detail: e.to_string(),
            })
    }

    /// Fully decode image bytes for embedding
    pub fn decode(&self, reference: &str, bytes: &[u8]) -> ExpenseResult<DynamicImage> {
        image::load_from_memory(bytes).map_err(|e| ExpenseError::ImageDecode {
            reference: reference.to_string(),
            detail: e.to_string(),
        })
    }

    /// Copy an image file into the store under a fresh name and return the
    /// reference to record on the expense.
    pub fn import(&self, source: &Path) -> ExpenseResult<String> {
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg")
            .to_ascii_lowercase();
        let filename = format!("receipt-{}.{}", Uuid::new_v4(), ext);
        let dest = self.root.join(&filename);

        fs::copy(source, &dest).map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to import receipt {}: {}",
                source.display(),
                e
            ))
        })?;

        Ok(format!("{}{}", REFERENCE_PREFIX, filename))
    }
}

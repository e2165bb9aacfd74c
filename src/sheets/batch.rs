//! Batch driver
//!
//! Runs the full composition pipeline: load every expense record once, group
//! them, compose one sheet per group in first-seen key order, and accumulate
//! a report. A fatal error in one group is recorded and the batch moves on;
//! the run as a whole only fails when no group could be processed.

use crate::error::ExpenseResult;
use crate::storage::ExpenseStore;

use super::compose::{ComposeResult, SheetComposer};
use super::group::{group_receipts, GroupKey};

/// A group whose composition failed fatally (e.g. the document could not be
/// written)
#[derive(Debug)]
pub struct GroupFailure {
    pub key: GroupKey,
    pub error: String,
}

/// Accumulated outcome of one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Per-group results for groups that composed successfully
    pub results: Vec<ComposeResult>,
    /// Groups that failed fatally
    pub failures: Vec<GroupFailure>,
}

impl BatchReport {
    /// Groups composed without a fatal error
    pub fn groups_processed(&self) -> usize {
        self.results.len()
    }

    /// Groups that failed fatally
    pub fn groups_failed(&self) -> usize {
        self.failures.len()
    }

    /// Images placed across all groups
    pub fn total_placed(&self) -> usize {
        self.results.iter().map(|r| r.placed_count()).sum()
    }

    /// Items skipped across all groups
    pub fn total_skipped(&self) -> usize {
        self.results.iter().map(|r| r.skipped.len()).sum()
    }

    /// No records with receipts existed, so there was nothing to compose
    pub fn no_work(&self) -> bool {
        self.results.is_empty() && self.failures.is_empty()
    }

    /// A run succeeds when at least one group was processed without a fatal
    /// error; skipped items do not fail a run, and an empty run is a success.
    pub fn is_success(&self) -> bool {
        self.no_work() || self.groups_processed() > 0
    }
}

/// Compose sheets for every group in the store
///
/// Reads all records once, partitions them, and invokes the composer per
/// group in deterministic first-seen order. Only a failure to list the
/// records aborts the batch.
pub fn run_batch(store: &dyn ExpenseStore, composer: &SheetComposer) -> ExpenseResult<BatchReport> {
    let records = store.list()?;
    let groups = group_receipts(&records);

    let mut report = BatchReport::default();
    for group in groups.values() {
        match composer.compose(group) {
            Ok(result) => report.results.push(result),
            Err(e) => report.failures.push(GroupFailure {
                key: group.key.clone(),
                error: e.to_string(),
            }),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseRecord, NewExpense};
    use crate::storage::{MemoryExpenseStore, ReceiptStore};
    use tempfile::TempDir;

    fn record(
        expense_type: &str,
        date: &str,
        receipt: Option<&str>,
    ) -> ExpenseRecord {
        let mut r = NewExpense::validate("8.00", expense_type, None, Some(date))
            .unwrap()
            .into_record();
        r.receipt_path = receipt.map(str::to_string);
        r
    }

    fn png(dir: &std::path::Path, name: &str) {
        let img = image::RgbImage::from_pixel(20, 30, image::Rgb([120, 120, 120]));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_empty_store_reports_no_work() {
        let temp = TempDir::new().unwrap();
        let receipts = ReceiptStore::open(temp.path().join("receipts")).unwrap();
        let composer = SheetComposer::new(&receipts, temp.path().join("out"));
        let store = MemoryExpenseStore::new();

        let report = run_batch(&store, &composer).unwrap();
        assert!(report.no_work());
        assert!(report.is_success());
        assert_eq!(report.total_placed(), 0);
    }

    #[test]
    fn test_one_document_per_group() {
        let temp = TempDir::new().unwrap();
        let receipts = ReceiptStore::open(temp.path().join("receipts")).unwrap();
        png(receipts.root(), "a.png");
        png(receipts.root(), "b.png");
        png(receipts.root(), "c.png");

        let store = MemoryExpenseStore::with_records(vec![
            record("Travel", "2024-03-05", Some("/receipts/a.png")),
            record("Meals", "2024-03-06", Some("/receipts/b.png")),
            record("Travel", "2024-04-01", Some("/receipts/c.png")),
            record("Travel", "2024-04-02", None),
        ]);

        let out = temp.path().join("out");
        let composer = SheetComposer::new(&receipts, &out);
        let report = run_batch(&store, &composer).unwrap();

        assert_eq!(report.groups_processed(), 3);
        assert_eq!(report.groups_failed(), 0);
        assert_eq!(report.total_placed(), 3);
        assert_eq!(report.total_skipped(), 0);
        assert!(report.is_success());

        assert!(out.join("expenses-2024-03-Travel.pdf").exists());
        assert!(out.join("expenses-2024-03-Meals.pdf").exists());
        assert!(out.join("expenses-2024-04-Travel.pdf").exists());
    }

    #[test]
    fn test_skips_are_counted_but_do_not_fail_the_run() {
        let temp = TempDir::new().unwrap();
        let receipts = ReceiptStore::open(temp.path().join("receipts")).unwrap();
        png(receipts.root(), "a.png");

        let store = MemoryExpenseStore::with_records(vec![
            record("Travel", "2024-03-05", Some("/receipts/a.png")),
            record("Travel", "2024-03-06", Some("/receipts/gone.png")),
        ]);

        let composer = SheetComposer::new(&receipts, temp.path().join("out"));
        let report = run_batch(&store, &composer).unwrap();

        assert_eq!(report.groups_processed(), 1);
        assert_eq!(report.total_placed(), 1);
        assert_eq!(report.total_skipped(), 1);
        assert!(report.is_success());
    }

    #[test]
    fn test_group_failure_does_not_abort_remaining_groups() {
        let temp = TempDir::new().unwrap();
        let receipts = ReceiptStore::open(temp.path().join("receipts")).unwrap();
        png(receipts.root(), "a.png");
        png(receipts.root(), "b.png");

        let store = MemoryExpenseStore::with_records(vec![
            record("Travel", "2024-03-05", Some("/receipts/a.png")),
            record("Meals", "2024-03-06", Some("/receipts/b.png")),
        ]);

        // A file standing where the output directory must go makes every
        // document write fail fatally per group
        let out = temp.path().join("out");
        std::fs::write(&out, b"in the way").unwrap();

        let composer = SheetComposer::new(&receipts, &out);
        let report = run_batch(&store, &composer).unwrap();

        assert_eq!(report.groups_processed(), 0);
        assert_eq!(report.groups_failed(), 2);
        assert!(!report.is_success());
    }
}

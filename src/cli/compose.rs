//! CLI command for composing receipt sheets

use clap::Args;
use std::path::PathBuf;

use crate::config::AppPaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::sheets::{run_batch, SheetComposer};
use crate::storage::{ExpenseStore, ReceiptStore};

/// Arguments for `receiptbook compose`
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Directory for the generated PDFs (defaults to the pdf-output
    /// directory under the data dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `receiptbook compose`
///
/// Runs the batch driver over the whole store and prints the run-end
/// summary. Fails only when groups existed and every one of them failed.
pub fn handle_compose_command(
    store: &dyn ExpenseStore,
    receipts: &ReceiptStore,
    paths: &AppPaths,
    args: ComposeArgs,
) -> ExpenseResult<()> {
    let output_dir = args.output.unwrap_or_else(|| paths.output_dir());
    let composer = SheetComposer::new(receipts, &output_dir);

    let report = run_batch(store, &composer)?;

    if report.no_work() {
        println!("No expenses with receipts to compose.");
        return Ok(());
    }

    for result in &report.results {
        println!(
            "Wrote {} ({} receipt(s), {} page(s))",
            result.output_path.display(),
            result.placed_count(),
            result.pages
        );
        for skip in &result.skipped {
            println!(
                "  skipped {} {} - {} ({})",
                skip.record.date,
                skip.record.amount,
                if skip.record.description.is_empty() {
                    skip.record.id.to_string()
                } else {
                    skip.record.description.clone()
                },
                skip.reason
            );
        }
    }

    for failure in &report.failures {
        println!("Failed {}: {}", failure.key.title(), failure.error);
    }

    println!();
    println!("Groups processed: {}", report.groups_processed());
    println!("Groups failed:    {}", report.groups_failed());
    println!("Receipts placed:  {}", report.total_placed());
    println!("Items skipped:    {}", report.total_skipped());

    if !report.is_success() {
        return Err(ExpenseError::Batch(format!(
            "All {} group(s) failed",
            report.groups_failed()
        )));
    }

    Ok(())
}

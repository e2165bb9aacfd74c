//! CLI commands for recording and listing expenses

use clap::Args;
use std::path::PathBuf;

use crate::error::ExpenseResult;
use crate::models::NewExpense;
use crate::storage::{ExpenseStore, ReceiptStore};

/// Arguments for `receiptbook add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount spent, e.g. "12.50"
    pub amount: String,

    /// Expense type, e.g. "Travel"
    #[arg(value_name = "TYPE")]
    pub expense_type: String,

    /// Free-form description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Expense date (YYYY-MM-DD, defaults to today)
    #[arg(short = 'D', long)]
    pub date: Option<String>,

    /// Path to a receipt image to attach (PNG or JPEG)
    #[arg(short, long)]
    pub receipt: Option<PathBuf>,
}

/// Arguments for `receiptbook list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show expenses in this month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Only show expenses of this type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub expense_type: Option<String>,
}

/// Handle `receiptbook add`
pub fn handle_add_command(
    store: &mut dyn ExpenseStore,
    receipts: &ReceiptStore,
    args: AddArgs,
) -> ExpenseResult<()> {
    let mut new_expense = NewExpense::validate(
        &args.amount,
        &args.expense_type,
        args.description,
        args.date.as_deref(),
    )?;

    if let Some(source) = &args.receipt {
        let reference = receipts.import(source)?;
        new_expense = new_expense.with_receipt(reference);
    }

    let record = new_expense.into_record();
    let summary = format!(
        "{} {} {} ({})",
        record.date,
        record.amount,
        record.expense_type.as_deref().unwrap_or("-"),
        record.id
    );
    store.append(record)?;

    println!("Recorded expense: {}", summary);
    Ok(())
}

/// Handle `receiptbook list`
pub fn handle_list_command(store: &dyn ExpenseStore, args: ListArgs) -> ExpenseResult<()> {
    let records = store.list()?;

    let filtered: Vec<_> = records
        .iter()
        .filter(|r| match &args.month {
            Some(month) => &r.year_month() == month,
            None => true,
        })
        .filter(|r| match &args.expense_type {
            Some(t) => r.expense_type.as_deref() == Some(t.as_str()),
            None => true,
        })
        .collect();

    if filtered.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    println!(
        "{:<12} {:>10}  {:<12} {:<8} {}",
        "Date", "Amount", "Type", "Receipt", "Description"
    );
    for record in &filtered {
        println!(
            "{:<12} {:>10}  {:<12} {:<8} {}",
            record.date.to_string(),
            record.amount.to_string(),
            record.expense_type.as_deref().unwrap_or("-"),
            if record.has_receipt() { "yes" } else { "-" },
            record.description
        );
    }

    let total: crate::models::Money = filtered.iter().map(|r| r.amount).sum();
    println!();
    println!("{} expense(s), total {}", filtered.len(), total);

    Ok(())
}

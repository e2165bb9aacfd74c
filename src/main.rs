use anyhow::Result;
use clap::{Parser, Subcommand};

use receiptbook::cli::{
    handle_add_command, handle_compose_command, handle_list_command, AddArgs, ComposeArgs,
    ListArgs,
};
use receiptbook::config::AppPaths;
use receiptbook::storage::{JsonExpenseStore, ReceiptStore};

#[derive(Parser)]
#[command(
    name = "receiptbook",
    version,
    about = "Expense tracker with printable PDF receipt sheets",
    long_about = "ReceiptBook records expenses with attached receipt images and \
                  lays the images out into printable PDF sheets, one document \
                  per month and expense type."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add(AddArgs),

    /// List recorded expenses
    #[command(alias = "ls")]
    List(ListArgs),

    /// Generate PDF receipt sheets, one per (month, type) group
    Compose(ComposeArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AppPaths::new()?;
    paths.ensure_directories()?;

    let mut store = JsonExpenseStore::new(paths.expenses_file());
    let receipts = ReceiptStore::open(paths.receipts_dir())?;

    match cli.command {
        Commands::Add(args) => {
            handle_add_command(&mut store, &receipts, args)?;
        }
        Commands::List(args) => {
            handle_list_command(&store, args)?;
        }
        Commands::Compose(args) => {
            handle_compose_command(&store, &receipts, &paths, args)?;
        }
        Commands::Config => {
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Expenses file:     {}", paths.expenses_file().display());
            println!("Receipts:          {}", paths.receipts_dir().display());
            println!("PDF output:        {}", paths.output_dir().display());
        }
    }

    Ok(())
}

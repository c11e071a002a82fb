mod analysis;
mod config;
mod error;
mod logging;
mod models;
mod operations;
mod storage;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use config::{DEFAULT_CONFIG_FILE, DEFAULT_LEDGER_FILE, Settings};
use models::transaction::TransactionType;
use operations::add::{NewTransaction, add_transaction_to_ledger};
use operations::export::export_transactions;
use operations::import::{ImportFormat, import_transactions_to_ledger};
use operations::payment_methods::{MethodAdded, add_payment_method, render_payment_methods};
use operations::remove::remove_transaction_from_ledger;
use operations::report::{build_report, render_report};
use operations::search::{TransactionFilter, render_transactions, search_transactions};
use std::path::PathBuf;
use storage::csv_ledger::{Ledger, read_transactions_from_path};
use storage::dates::DateRange;

#[derive(Parser)]
#[command(
    name = "finlog",
    version,
    about = "Record income and expenses in a CSV ledger and report on them",
    arg_required_else_help = true
)]
struct Cli {
    /// Ledger CSV file
    #[arg(long, global = true, env = "FINLOG_LEDGER", default_value = DEFAULT_LEDGER_FILE)]
    ledger: PathBuf,

    /// Settings JSON file
    #[arg(long, global = true, env = "FINLOG_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Only income or only expenses
    #[arg(long = "type", value_parser = TransactionType::parse)]
    transaction_type: Option<TransactionType>,
    /// Payment method (case-insensitive)
    #[arg(long)]
    method: Option<String>,
    /// Date range FROM..TO (YYYY-MM-DD, either side optional)
    #[arg(long, value_parser = DateRange::parse)]
    range: Option<DateRange>,
}

impl From<FilterArgs> for TransactionFilter {
    fn from(args: FilterArgs) -> Self {
        TransactionFilter {
            transaction_type: args.transaction_type,
            payment_method: args.method,
            range: args.range.unwrap_or_default(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Record a single income or expense
    Add {
        /// income/expense (Ingreso/Gasto also accepted)
        #[arg(long = "type")]
        transaction_type: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: String,
        /// Payment method, e.g. efectivo or transferencia
        #[arg(long)]
        method: String,
        /// Transaction date, defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Necessity rating 1-6, expenses only
        #[arg(long)]
        rating: Option<String>,
    },
    /// Append all rows of a CSV file to the ledger
    Import { file: PathBuf },
    /// List ledger rows with their row numbers
    #[command(alias = "search")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Delete a ledger row by number
    Remove { row: usize },
    /// Write ledger rows to another CSV file
    Export {
        file: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show or extend the list of payment methods
    #[command(subcommand)]
    Methods(MethodCommands),
    /// Totals, monthly trend, payment methods and spending warnings
    Report {
        /// Analyse this CSV instead of the ledger
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, value_parser = DateRange::parse)]
        range: Option<DateRange>,
    },
}

#[derive(Subcommand)]
enum MethodCommands {
    List,
    Add { name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mut settings = Settings::load(&cli.config)?;

    match cli.command {
        Commands::Add {
            transaction_type,
            description,
            amount,
            method,
            date,
            rating,
        } => {
            let mut ledger = Ledger::open(&cli.ledger)?;
            let input = NewTransaction {
                transaction_type,
                description,
                amount,
                payment_method: method,
                date,
                rating,
            };
            let outcome = add_transaction_to_ledger(&mut ledger, &mut settings, &input)?;
            if outcome.new_payment_method {
                settings.save(&cli.config)?;
                println!(
                    "Payment method '{}' added to the list.",
                    outcome.transaction.payment_method
                );
            }
            println!(
                "Recorded {} #{}: {} {:.2} ({})",
                outcome.transaction.transaction_type,
                outcome.row,
                outcome.transaction.description,
                outcome.transaction.amount,
                outcome.transaction.date
            );
        }
        Commands::Import { file } => {
            let mut ledger = Ledger::open(&cli.ledger)?;
            let count = import_transactions_to_ledger(&mut ledger, ImportFormat::Csv, &file)
                .with_context(|| format!("Error importing '{}'", file.display()))?;
            println!(
                "Successfully imported {} transactions into {}.",
                count,
                ledger.path().display()
            );
        }
        Commands::List { filter } => {
            let ledger = Ledger::open(&cli.ledger)?;
            let filter = TransactionFilter::from(filter);
            let rows = search_transactions(&filter, ledger.transactions());
            print!("{}", render_transactions(&rows));
        }
        Commands::Remove { row } => {
            let mut ledger = Ledger::open(&cli.ledger)?;
            let removed = remove_transaction_from_ledger(&mut ledger, row)?;
            println!("Removed transaction #{}: {}", row, removed.description);
        }
        Commands::Export { file, filter } => {
            let ledger = Ledger::open(&cli.ledger)?;
            let count = export_transactions(ledger.transactions(), &filter.into(), &file)?;
            println!("Exported {} transactions to {}", count, file.display());
        }
        Commands::Methods(MethodCommands::List) => {
            print!("{}", render_payment_methods(&settings));
        }
        Commands::Methods(MethodCommands::Add { name }) => {
            match add_payment_method(&mut settings, &cli.config, &name)? {
                MethodAdded::Added(method) => {
                    println!("Payment method '{}' added to the list.", method)
                }
                MethodAdded::AlreadyKnown(method) => {
                    println!("Payment method '{}' is already in the list.", method)
                }
            }
        }
        Commands::Report { file, range } => {
            let source = file.as_ref().unwrap_or(&cli.ledger);
            let transactions = match &file {
                Some(path) => read_transactions_from_path(path)
                    .with_context(|| format!("Error reading '{}'", path.display()))?,
                None => Ledger::open(&cli.ledger)?.transactions().to_vec(),
            };
            let range = range.unwrap_or_default();
            let selected: Vec<_> = transactions
                .into_iter()
                .filter(|t| range.contains(t.date))
                .collect();

            let data = build_report(&selected, &settings.thresholds);
            let title = format!("Finance report: {}", source.display());
            print!("{}", render_report(&title, &data));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list_filters() {
        let cli = Cli::try_parse_from([
            "finlog", "list", "--type", "gasto", "--method", "efectivo", "--range", "2024-01-01..",
        ])
        .unwrap();
        match cli.command {
            Commands::List { filter } => {
                assert_eq!(filter.transaction_type, Some(TransactionType::Expense));
                assert_eq!(filter.method.as_deref(), Some("efectivo"));
                assert!(filter.range.unwrap().to.is_none());
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn parse_rejects_bad_range() {
        assert!(Cli::try_parse_from(["finlog", "report", "--range", "2024-02-01..2024-01-01"]).is_err());
    }
}

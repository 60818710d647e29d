//! Transaction CLI commands
//!
//! Implements CLI commands for recording and listing transactions.

use chrono::Local;
use clap::{ArgGroup, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_transaction_added, format_transaction_table};
use crate::error::TrackerResult;
use crate::models::{Month, TransactionKind};
use crate::services::transaction::{parse_amount, parse_date};
use crate::services::{BudgetService, CreateTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new income or expense
    #[command(group(ArgGroup::new("kind").required(true).args(["income", "expense"])))]
    Add {
        /// Amount (e.g., "45.99"), must be positive
        amount: String,
        /// Category name
        category: String,
        /// Record as income
        #[arg(long)]
        income: bool,
        /// Record as expense
        #[arg(long)]
        expense: bool,
        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Transaction date (YYYY-MM-DD, MM/DD/YYYY, ...), defaults to today
        #[arg(short = 'D', long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by category name
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Show only income
        #[arg(long, conflicts_with = "expenses")]
        income: bool,
        /// Show only expenses
        #[arg(long)]
        expenses: bool,
        /// Start date
        #[arg(long)]
        from: Option<String>,
        /// End date
        #[arg(long)]
        to: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show the current balance (total income minus total expenses)
    Balance,
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TrackerResult<()> {
    let service = TransactionService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            income,
            expense: _,
            description,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };

            let txn = service.add(CreateTransactionInput {
                amount,
                category,
                description,
                date,
                kind,
            })?;
            println!("{}", format_transaction_added(&txn, symbol));

            BudgetService::new(storage).refresh_month(Month::current())?;
        }

        TransactionCommands::List {
            category,
            income,
            expenses,
            from,
            to,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);

            if let Some(from) = from {
                filter.start_date = Some(parse_date(&from)?);
            }
            if let Some(to) = to {
                filter.end_date = Some(parse_date(&to)?);
            }
            if income {
                filter = filter.kind(TransactionKind::Income);
            } else if expenses {
                filter = filter.kind(TransactionKind::Expense);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }

            let transactions = service.list(filter)?;
            print!(
                "{}",
                format_transaction_table(&transactions, symbol, &settings.date_format)
            );
            if !transactions.is_empty() {
                println!("Showing {} of {} transactions", transactions.len(), service.count()?);
            }
        }

        TransactionCommands::Balance => {
            let (income, expenses) = service.totals()?;
            println!("Total income:    {}", income.format_with_symbol(symbol));
            println!("Total expenses:  {}", expenses.format_with_symbol(symbol));
            println!(
                "Current balance: {}",
                service.balance()?.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}

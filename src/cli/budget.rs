//! Budget CLI commands
//!
//! Implements CLI commands for the budget ledger: limits, spending refresh,
//! status, and reallocation suggestions.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_status_table;
use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;
use crate::services::BudgetService;
use crate::storage::Storage;

use super::parse_month_arg;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set (or update) a category's monthly limit
    Set {
        /// Category name
        category: String,
        /// Monthly limit (e.g., "600" or "600.00")
        #[arg(allow_negative_numbers = true)]
        limit: String,
    },

    /// Show spending against each category's limit
    Status,

    /// List categories that have exceeded their limit
    Overspent,

    /// Suggest moving funds from underspent to overspent categories
    Suggest,

    /// Print the full budget report
    Report,

    /// Recompute category spending from the transaction history
    Refresh {
        /// Month to recompute (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Create a starter budget with common categories
    Sample,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set { category, limit } => {
            let limit = Money::parse(&limit).map_err(|e| {
                TrackerError::Validation(format!(
                    "Invalid limit: '{}'. Use a number like '600' or '600.00'. Error: {}",
                    limit, e
                ))
            })?;
            let updated = service.set_limit(&category, limit)?;
            println!(
                "Budget set for {}: {}",
                updated.name,
                updated.monthly_limit.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Status => {
            print!("{}", format_status_table(&service.status()?, symbol));
            let total = service.total_budget()?;
            let spent = service.total_spent()?;
            if !total.is_zero() || !spent.is_zero() {
                println!(
                    "Total: {} of {} spent",
                    spent.format_with_symbol(symbol),
                    total.format_with_symbol(symbol)
                );
            }
        }

        BudgetCommands::Overspent => {
            let overspent = service.overspent()?;
            if overspent.is_empty() {
                println!("No overspent categories.");
            } else {
                println!("Overspent categories:");
                for name in overspent {
                    println!("  {}", name);
                }
            }
        }

        BudgetCommands::Suggest => {
            let suggestions = service.suggest_reallocation()?;
            if suggestions.is_empty() {
                println!("No reallocation suggestions.");
            } else {
                for suggestion in suggestions {
                    println!("{}: {}", suggestion.category, suggestion);
                }
            }
        }

        BudgetCommands::Report => {
            print!("{}", service.report()?);
        }

        BudgetCommands::Refresh { month } => {
            let month = parse_month_arg(month.as_deref())?;
            service.refresh_month(month)?;
            println!("Budget spending recomputed for {}", month.friendly());
        }

        BudgetCommands::Sample => {
            let created = service.create_sample_budget()?;
            println!("Sample budget created with default categories!");
            for category in created {
                println!(
                    "  {:<16} {}",
                    category.name,
                    category.monthly_limit.format_with_symbol(symbol)
                );
            }
        }
    }

    Ok(())
}

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod export;
pub mod menu;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportCommands};
pub use menu::run_menu;
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{TrackerError, TrackerResult};
use crate::models::Month;

/// Parse an optional month argument, defaulting to the current month
pub(crate) fn parse_month_arg(month: Option<&str>) -> TrackerResult<Month> {
    match month {
        Some(s) => Month::parse(s).map_err(|e| TrackerError::Validation(e.to_string())),
        None => Ok(Month::current()),
    }
}

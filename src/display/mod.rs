//! Display formatting for terminal output
//!
//! Tables for transactions and budget status, plus bar charts and other
//! small text helpers used by the reports.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::format_status_table;
pub use report::{format_bar, format_percentage, format_spending_chart, separator, truncate};
pub use transaction::{format_transaction_added, format_transaction_table};

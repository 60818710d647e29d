//! Reports module for the finance tracker
//!
//! Derived views over the transaction history and budget ledger: monthly
//! summary, budget report, financial health score and spending trend.

pub mod budget;
pub mod health;
pub mod monthly;
pub mod trend;

pub use budget::BudgetReport;
pub use health::{Grade, HealthScore};
pub use monthly::{CategoryExpense, MonthlySummary};
pub use trend::{SpendingTrend, TrendDirection};

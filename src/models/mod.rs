//! Core data models for the finance tracker
//!
//! Transactions, budget categories, amounts and calendar months.

pub mod budget;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{AlertLevel, BudgetCategory, CategoryStatus, ReallocationSuggestion};
pub use money::Money;
pub use period::Month;
pub use transaction::{Transaction, TransactionKind};

//! Service layer for the finance tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, persistence and audit logging.

pub mod budget;
pub mod transaction;

pub use budget::BudgetService;
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService};

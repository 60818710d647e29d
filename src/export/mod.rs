//! Export module for the finance tracker
//!
//! - CSV: the transaction history, spreadsheet-compatible
//! - JSON: a versioned snapshot of transactions and budget

pub mod csv;
pub mod json;

pub use self::csv::{export_transactions_csv, write_transactions_csv};
pub use self::json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};

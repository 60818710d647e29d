//! JSON snapshot export
//!
//! Writes the transaction history and budget ledger to a single versioned
//! document.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetCategory, Money, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full snapshot of the tracker's data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of the program that wrote the export
    pub app_version: String,
    pub transactions: Vec<Transaction>,
    pub budget: Vec<BudgetCategory>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub budget_category_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
    /// Total income minus total expenses
    pub balance: Money,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> TrackerResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let budget = storage.budget.get_all()?;

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            budget_category_count: budget.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
            balance: transactions.iter().map(Transaction::signed_amount).sum(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budget,
            metadata,
        })
    }

    /// Check the schema version and that the counts match the contents
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        if self.metadata.transaction_count != self.transactions.len() {
            return Err("Transaction count does not match metadata".into());
        }
        if self.metadata.budget_category_count != self.budget.len() {
            return Err("Budget category count does not match metadata".into());
        }
        Ok(())
    }
}

/// Write a pretty-printed snapshot of all data
pub fn export_full_json<W: Write>(storage: &Storage, mut writer: W) -> TrackerResult<FullExport> {
    let export = FullExport::from_storage(storage)?;
    serde_json::to_writer_pretty(&mut writer, &export)
        .map_err(|e| TrackerError::Export(format!("Failed to write JSON export: {}", e)))?;
    writer.flush()?;
    Ok(export)
}

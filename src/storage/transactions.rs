//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. The document
//! is a bare array and records keep the order they were added in.

use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::TrackerError;
use crate::models::{Transaction, TransactionKind};

use super::file_io::{load_records, save_records};

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from disk, replacing whatever is in memory
    pub fn load(&self) -> Result<(), TrackerError> {
        let transactions: Vec<Transaction> = load_records(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = transactions;

        Ok(())
    }

    /// Rewrite the whole document
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        save_records(&self.path, data.as_slice())
    }

    /// Append a transaction, returning its 1-based position
    pub fn append(&self, txn: Transaction) -> Result<usize, TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.push(txn);
        Ok(data.len())
    }

    /// All transactions in insertion order
    pub fn get_all(&self) -> Result<Vec<Transaction>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Transactions dated within `start..=end`
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .iter()
            .filter(|t| t.date >= start && t.date <= end)
            .cloned()
            .collect())
    }

    pub fn get_by_kind(&self, kind: TransactionKind) -> Result<Vec<Transaction>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().filter(|t| t.kind == kind).cloned().collect())
    }

    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

//! Budget category repository for JSON storage
//!
//! Manages loading and saving budget categories to budget.json. Categories are
//! kept in the order they were first configured.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TrackerError;
use crate::models::{BudgetCategory, Money};

use super::file_io::{load_records, save_records};

/// Repository for budget category persistence
pub struct BudgetRepository {
    path: PathBuf,
    categories: RwLock<Vec<BudgetCategory>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(Vec::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: Vec<BudgetCategory> = load_records(&self.path)?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *categories = file_data;

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        save_records(&self.path, categories.as_slice())
    }

    /// Get a category by exact name
    pub fn get(&self, name: &str) -> Result<Option<BudgetCategory>, TrackerError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.iter().find(|c| c.name == name).cloned())
    }

    /// All categories in configuration order
    pub fn get_all(&self) -> Result<Vec<BudgetCategory>, TrackerError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.clone())
    }

    /// Create the category with zero spend, or update its limit in place
    ///
    /// Returns the previous state (if any) and the new state.
    pub fn upsert_limit(
        &self,
        name: &str,
        monthly_limit: Money,
    ) -> Result<(Option<BudgetCategory>, BudgetCategory), TrackerError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => {
                let before = existing.clone();
                existing.monthly_limit = monthly_limit;
                Ok((Some(before), existing.clone()))
            }
            None => {
                let category = BudgetCategory::new(name, monthly_limit);
                categories.push(category.clone());
                Ok((None, category))
            }
        }
    }

    /// Reset every category's spending to zero
    pub fn reset_spending(&self) -> Result<(), TrackerError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        for category in categories.iter_mut() {
            category.current_spent = Money::zero();
        }
        Ok(())
    }

    /// Add to a category's spending; returns false when no such category exists
    pub fn add_spending(&self, name: &str, amount: Money) -> Result<bool, TrackerError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match categories.iter_mut().find(|c| c.name == name) {
            Some(category) => {
                category.current_spent += amount;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn count(&self) -> Result<usize, TrackerError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.len())
    }
}

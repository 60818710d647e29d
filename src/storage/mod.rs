//! Storage layer for the finance tracker
//!
//! Two independent JSON documents (transactions and budget), each rewritten in
//! full on every save, plus the append-only audit log.

pub mod budget;
pub mod file_io;
pub mod transactions;

pub use budget::BudgetRepository;
pub use file_io::{load_records, save_records};
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TrackerPaths,
    pub transactions: TransactionRepository,
    pub budget: BudgetRepository,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budget: BudgetRepository::new(paths.budget_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            paths,
        })
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Turn audit logging on or off
    pub fn set_audit_enabled(&mut self, enabled: bool) {
        self.audit_enabled = enabled;
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TrackerError> {
        self.transactions.load()?;
        self.budget.load()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TrackerError> {
        self.write_audit(|| AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), TrackerError> {
        self.write_audit(|| AuditEntry::update(entity_type, entity_id, entity_name, before, after))
    }

    pub fn log_refresh(
        &self,
        entity_type: EntityType,
        scope: impl Into<String>,
        summary: String,
    ) -> Result<(), TrackerError> {
        self.write_audit(|| AuditEntry::refresh(entity_type, scope, summary))
    }

    fn write_audit(&self, entry: impl FnOnce() -> AuditEntry) -> Result<(), TrackerError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log(&entry())
    }
}

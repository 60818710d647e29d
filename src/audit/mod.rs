//! Audit logging for the finance tracker
//!
//! Every transaction added, budget limit set and spending refresh is appended
//! to `audit.log` as one JSON object per line.
//!
//! - `AuditEntry`: timestamp, operation, entity information and optional
//!   before/after snapshots with a summary of changed fields.
//! - `AuditLogger`: appends entries to the log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

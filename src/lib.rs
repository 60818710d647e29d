//! Finance Tracker - personal income/expense tracking with budget alerts
//!
//! This library provides the core functionality for the `fintrack` binary. It
//! records income and expense transactions, tracks spending against monthly
//! category limits, and derives reports such as monthly summaries and a
//! financial health score.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, transactions, budget categories, months)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Monthly summary, budget report, health score and trends
//! - `audit`: Audit logging system
//! - `export`: CSV and JSON export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{paths::TrackerPaths, settings::Settings};
//! use finance_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};

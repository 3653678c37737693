//! fintrack - Personal finance tracking and analytics
//!
//! This library provides the core functionality for the fintrack command
//! line application: recording expenses, income, budgets, investments,
//! savings goals, recurring transactions and split bills, and turning them
//! into dashboards, budget status, portfolio and trend reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, months, records)
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `analytics`: Aggregation and ratio helpers
//! - `reports`: Report generation
//! - `export`: CSV, JSON, YAML and text export
//! - `display`: Terminal tables and report formatting helpers
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{FintrackPaths, Settings};
//! use fintrack::storage::Storage;
//!
//! let paths = FintrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod analytics;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{FintrackError, FintrackResult};

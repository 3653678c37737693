//! Export module for fintrack
//!
//! - CSV: record lists and report tables, every field quoted
//! - Text: all reports as one plain-text document
//! - JSON / YAML: every record with schema version and metadata

pub mod csv;
pub mod json;
pub mod text;
pub mod yaml;

pub use csv::{export_expenses_csv, export_goals_csv, export_income_csv, export_investments_csv};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use text::export_text_report;
pub use yaml::export_full_yaml;

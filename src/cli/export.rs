//! Export CLI commands
//!
//! Output goes to stdout unless `--output` names a file.

use clap::{Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::FintrackResult;
use crate::export::{
    export_expenses_csv, export_full_json, export_full_yaml, export_goals_csv,
    export_income_csv, export_investments_csv, export_text_report, FullExport,
};
use crate::storage::Storage;

use super::args::{output_writer, parse_month, today};

/// Record lists available as CSV
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CsvCollection {
    Expenses,
    Income,
    Investments,
    Goals,
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export one record list as CSV
    Csv {
        /// Which records
        #[arg(value_enum)]
        collection: CsvCollection,
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write every report as one plain-text document
    Report {
        /// Month for the dashboard and budget sections (defaults to all time)
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every record as JSON
    Json {
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Export every record as YAML
    Yaml {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> FintrackResult<()> {
    match cmd {
        ExportCommands::Csv { collection, output } => {
            let mut writer = output_writer(output.as_deref())?;
            let count = match collection {
                CsvCollection::Expenses => {
                    let records = storage.expenses.get_all()?;
                    export_expenses_csv(&records, &mut writer)?;
                    records.len()
                }
                CsvCollection::Income => {
                    let records = storage.income.get_all()?;
                    export_income_csv(&records, &mut writer)?;
                    records.len()
                }
                CsvCollection::Investments => {
                    let records = storage.investments.get_all()?;
                    export_investments_csv(&records, &mut writer)?;
                    records.len()
                }
                CsvCollection::Goals => {
                    let records = storage.goals.get_all()?;
                    export_goals_csv(&records, &mut writer)?;
                    records.len()
                }
            };
            if let Some(path) = output {
                println!("Exported {} records to {}", count, path.display());
            }
        }

        ExportCommands::Report { month, output } => {
            let period = month.as_deref().map(parse_month).transpose()?;
            let snapshot = storage.snapshot()?;
            let mut writer = output_writer(output.as_deref())?;
            export_text_report(&snapshot, settings, period, today(), &mut writer)?;
            writer.flush()?;
            if let Some(path) = output {
                println!("Report written to {}", path.display());
            }
        }

        ExportCommands::Json { output, pretty } => {
            let export = FullExport::from_snapshot(storage.snapshot()?, settings.base_currency);
            let mut writer = output_writer(output.as_deref())?;
            export_full_json(&export, &mut writer, pretty)?;
            writer.flush()?;
            if let Some(path) = output {
                println!(
                    "Exported {} records to {}",
                    export.records.record_count(),
                    path.display()
                );
            }
        }

        ExportCommands::Yaml { output } => {
            let export = FullExport::from_snapshot(storage.snapshot()?, settings.base_currency);
            let mut writer = output_writer(output.as_deref())?;
            export_full_yaml(&export, &mut writer)?;
            writer.flush()?;
            if let Some(path) = output {
                println!(
                    "Exported {} records to {}",
                    export.records.record_count(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}

//! Report CLI commands
//!
//! Every report prints to the terminal, or writes CSV when `--output` is
//! given.

use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::FintrackResult;
use crate::reports::{
    BudgetStatusReport, DashboardSummary, GoalsReport, PortfolioReport, RecurringOverview,
    SplitsReport, TrendReport,
};
use crate::storage::Storage;

use super::args::{output_writer, parse_month, parse_month_or_current, today};

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Totals, breakdowns, trends, portfolio and goals at a glance
    Dashboard {
        /// Limit income and expense figures to one month
        #[arg(short, long)]
        month: Option<String>,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Spending against a month's budget
    Budget {
        /// Month (defaults to current)
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Gains and allocation of every holding
    Portfolio {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Progress toward savings goals
    Goals {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Settlement of shared bills
    Splits {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Projected monthly recurring income and spending
    Recurring {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month-by-month income, spending and savings rate
    Trend {
        /// Number of months (defaults to the configured window)
        #[arg(short = 'n', long)]
        months: Option<usize>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FintrackResult<()> {
    let snapshot = storage.snapshot()?;
    let fmt = settings.formatter();
    let fallback = settings.fallback_category.as_str();

    match cmd {
        ReportCommands::Dashboard { month, output } => {
            let period = month.as_deref().map(parse_month).transpose()?;
            let report = DashboardSummary::generate(
                &snapshot,
                period,
                settings.trend_window_months,
                fallback,
            );
            match output {
                Some(path) => report.export_csv(&mut output_writer(Some(path.as_path()))?)?,
                None => print!("{}", report.format_terminal(&fmt)),
            }
        }

        ReportCommands::Budget { month, output } => {
            let month = parse_month_or_current(month.as_deref())?;
            let report = BudgetStatusReport::generate(&snapshot, month, fallback)?;
            match output {
                Some(path) => report.export_csv(&mut output_writer(Some(path.as_path()))?)?,
                None => print!("{}", report.format_terminal(&fmt)),
            }
        }

        ReportCommands::Portfolio { output } => {
            let report = PortfolioReport::generate(&snapshot);
            match output {
                Some(path) => report.export_csv(&mut output_writer(Some(path.as_path()))?)?,
                None => print!("{}", report.format_terminal(&fmt)),
            }
        }

        ReportCommands::Goals { output } => {
            let report = GoalsReport::generate(&snapshot, today());
            match output {
                Some(path) => report.export_csv(&mut output_writer(Some(path.as_path()))?)?,
                None => print!("{}", report.format_terminal(&fmt)),
            }
        }

        ReportCommands::Splits { output } => {
            let report = SplitsReport::generate(&snapshot);
            match output {
                Some(path) => report.export_csv(&mut output_writer(Some(path.as_path()))?)?,
                None => print!("{}", report.format_terminal(&fmt)),
            }
        }

        ReportCommands::Recurring { output } => {
            let report = RecurringOverview::generate(&snapshot, today());
            match output {
                Some(path) => report.export_csv(&mut output_writer(Some(path.as_path()))?)?,
                None => print!("{}", report.format_terminal(&fmt)),
            }
        }

        ReportCommands::Trend { months, output } => {
            let window = months.unwrap_or(settings.trend_window_months);
            let report = TrendReport::generate(&snapshot, window);
            match output {
                Some(path) => report.export_csv(&mut output_writer(Some(path.as_path()))?)?,
                None => print!("{}", report.format_terminal(&fmt)),
            }
        }
    }

    Ok(())
}

//! Plain-text report combining every report section

use chrono::NaiveDate;
use std::io::Write;

use crate::config::Settings;
use crate::display::report::double_separator;
use crate::error::FintrackResult;
use crate::models::{FinanceSnapshot, Month};
use crate::reports::{
    BudgetStatusReport, DashboardSummary, GoalsReport, PortfolioReport, RecurringOverview,
    SplitsReport, TrendReport,
};

/// Write the dashboard followed by every other report as plain text
///
/// The budget section is included only when `period` has a budget.
pub fn export_text_report<W: Write>(
    snapshot: &FinanceSnapshot,
    settings: &Settings,
    period: Option<Month>,
    as_of: NaiveDate,
    writer: &mut W,
) -> FintrackResult<()> {
    let fmt = settings.formatter();
    let window = settings.trend_window_months;
    let fallback = settings.fallback_category.as_str();

    let mut sections = vec![
        DashboardSummary::generate(snapshot, period, window, fallback).format_terminal(&fmt),
    ];

    if let Some(month) = period {
        if snapshot.budget_for(month).is_some() {
            let budget = BudgetStatusReport::generate(snapshot, month, fallback)?;
            sections.push(budget.format_terminal(&fmt));
        }
    }

    sections.push(TrendReport::generate(snapshot, window).format_terminal(&fmt));
    sections.push(PortfolioReport::generate(snapshot).format_terminal(&fmt));
    sections.push(GoalsReport::generate(snapshot, as_of).format_terminal(&fmt));
    sections.push(RecurringOverview::generate(snapshot, as_of).format_terminal(&fmt));
    sections.push(SplitsReport::generate(snapshot).format_terminal(&fmt));

    writeln!(writer, "fintrack report generated {}", as_of)?;
    writeln!(writer, "{}", double_separator(60))?;
    for section in sections {
        writeln!(writer)?;
        write!(writer, "{}", section)?;
    }

    log::debug!("Wrote plain-text report as of {}", as_of);
    Ok(())
}

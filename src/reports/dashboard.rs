//! Dashboard summary
//!
//! Headline figures across every record type, either for all time or for
//! a single month.

use serde::Serialize;
use std::io::Write;

use crate::analytics::{
    filter_month, gain_loss, goal_progress, group_totals_with_fallback, month_buckets,
    percentage, savings_rate, top_key, total, GainLoss, GroupTotals, MonthTotal,
};
use crate::display::report::{
    double_separator, format_bar, format_percentage, progress_bar, separator,
};
use crate::error::FintrackResult;
use crate::export::csv::quoted_writer;
use crate::models::{CurrencyFormatter, Expense, FinanceSnapshot, Income, Money, Month};

use super::trend::{cash_flow, CashFlowPoint};

/// One key of a breakdown with its share of the whole
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub key: String,
    pub amount: Money,
    pub percentage: f64,
}

/// Rows for a grouped breakdown, largest first
pub fn breakdown_rows(groups: &GroupTotals) -> Vec<BreakdownRow> {
    let whole = groups.total();
    groups
        .sorted_desc()
        .into_iter()
        .map(|entry| BreakdownRow {
            key: entry.key.clone(),
            amount: entry.amount,
            percentage: percentage(entry.amount, whole),
        })
        .collect()
}

/// Dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Month the income and expense figures cover, or None for all time
    pub period: Option<Month>,
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_savings: Money,
    pub savings_rate: f64,
    pub expense_count: usize,
    pub income_count: usize,
    /// Spending by category, largest first
    pub expense_breakdown: Vec<BreakdownRow>,
    /// Income by source, largest first
    pub income_breakdown: Vec<BreakdownRow>,
    /// Category with the most spending; ties go to the first one recorded
    pub top_category: Option<BreakdownRow>,
    /// Monthly expense totals over the trend window
    pub expense_trend: Vec<MonthTotal>,
    /// Monthly income totals over the trend window
    pub income_trend: Vec<MonthTotal>,
    /// Combined monthly cash flow over the trend window
    pub cash_flow: Vec<CashFlowPoint>,
    pub portfolio_value: Money,
    pub portfolio_gain: GainLoss,
    pub goals_saved: Money,
    pub goals_target: Money,
    pub goal_progress: f64,
}

impl DashboardSummary {
    /// Generate the dashboard
    ///
    /// `period` restricts income and expense figures to one month; trends,
    /// portfolio and goals always cover everything.
    pub fn generate(
        snapshot: &FinanceSnapshot,
        period: Option<Month>,
        window: usize,
        fallback_category: &str,
    ) -> Self {
        let expenses: Vec<&Expense> = match period {
            Some(month) => filter_month(&snapshot.expenses, |e| e.date, month),
            None => snapshot.expenses.iter().collect(),
        };
        let income: Vec<&Income> = match period {
            Some(month) => filter_month(&snapshot.income, |i| i.date, month),
            None => snapshot.income.iter().collect(),
        };

        let total_income = total(&income, |i| i.amount);
        let total_expenses = total(&expenses, |e| e.amount);

        let by_category = group_totals_with_fallback(
            &expenses,
            |e| Some(e.category.as_str()),
            |e| e.amount,
            fallback_category,
        );
        let by_source = group_totals_with_fallback(
            &income,
            |i| Some(i.source.label()),
            |i| i.amount,
            fallback_category,
        );

        let expense_breakdown = breakdown_rows(&by_category);
        let top_category = top_key(&by_category).map(|(key, amount)| BreakdownRow {
            key: key.to_string(),
            amount,
            percentage: percentage(amount, total_expenses),
        });

        let portfolio_value = total(&snapshot.investments, |i| i.current_value);
        let portfolio_cost = total(&snapshot.investments, |i| i.initial_amount);
        let goals_saved = total(&snapshot.goals, |g| g.current_amount);
        let goals_target = total(&snapshot.goals, |g| g.target_amount);

        Self {
            period,
            total_income,
            total_expenses,
            net_savings: total_income - total_expenses,
            savings_rate: savings_rate(total_income, total_expenses),
            expense_count: expenses.len(),
            income_count: income.len(),
            expense_breakdown,
            income_breakdown: breakdown_rows(&by_source),
            top_category,
            expense_trend: month_buckets(&snapshot.expenses, |e| e.date, |e| e.amount, window),
            income_trend: month_buckets(&snapshot.income, |i| i.date, |i| i.amount, window),
            cash_flow: cash_flow(snapshot, window),
            portfolio_value,
            portfolio_gain: gain_loss(portfolio_value, portfolio_cost),
            goals_saved,
            goals_target,
            goal_progress: goal_progress(goals_saved, goals_target),
        }
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, fmt: &CurrencyFormatter) -> String {
        let mut output = String::new();

        let title = match self.period {
            Some(month) => format!("Dashboard: {}", month.short_label()),
            None => "Dashboard: All Time".to_string(),
        };
        output.push_str(&title);
        output.push('\n');
        output.push_str(&double_separator(60));
        output.push('\n');

        output.push_str(&format!(
            "{:<20} {:>16}  ({} entries)\n",
            "Total Income",
            fmt.format(self.total_income),
            self.income_count
        ));
        output.push_str(&format!(
            "{:<20} {:>16}  ({} entries)\n",
            "Total Expenses",
            fmt.format(self.total_expenses),
            self.expense_count
        ));
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Net Savings",
            fmt.format(self.net_savings)
        ));
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Savings Rate",
            format_percentage(self.savings_rate)
        ));
        if let Some(top) = &self.top_category {
            output.push_str(&format!(
                "{:<20} {:>16}  {} ({})\n",
                "Top Category",
                fmt.format(top.amount),
                top.key,
                format_percentage(top.percentage)
            ));
        }

        output.push_str("\nSpending by Category\n");
        output.push_str(&separator(60));
        output.push('\n');
        if self.expense_breakdown.is_empty() {
            output.push_str("  No expenses recorded.\n");
        }
        for row in &self.expense_breakdown {
            output.push_str(&format!(
                "  {:<18} {:>14} {:>7}  {}\n",
                row.key,
                fmt.format(row.amount),
                format_percentage(row.percentage),
                format_bar(row.percentage, 100.0, 15)
            ));
        }

        if !self.income_breakdown.is_empty() {
            output.push_str("\nIncome by Source\n");
            output.push_str(&separator(60));
            output.push('\n');
            for row in &self.income_breakdown {
                output.push_str(&format!(
                    "  {:<18} {:>14} {:>7}\n",
                    row.key,
                    fmt.format(row.amount),
                    format_percentage(row.percentage)
                ));
            }
        }

        if !self.cash_flow.is_empty() {
            output.push_str("\nMonthly Cash Flow\n");
            output.push_str(&separator(60));
            output.push('\n');
            for point in &self.cash_flow {
                output.push_str(&format!(
                    "  {:<10} in {:>14}  out {:>14}  net {:>14}\n",
                    point.month.short_label(),
                    fmt.format(point.income),
                    fmt.format(point.expenses),
                    fmt.format(point.net)
                ));
            }
        }

        output.push_str("\nPortfolio & Goals\n");
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "  {:<18} {:>14}  {} ({})\n",
            "Portfolio Value",
            fmt.format(self.portfolio_value),
            fmt.format(self.portfolio_gain.absolute),
            format_percentage(self.portfolio_gain.percent)
        ));
        output.push_str(&format!(
            "  {:<18} {:>14}  of {}  {} {}\n",
            "Goals Saved",
            fmt.format(self.goals_saved),
            fmt.format(self.goals_target),
            progress_bar(self.goal_progress, 15),
            format_percentage(self.goal_progress)
        ));

        output
    }

    /// Export the dashboard to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        let mut wtr = quoted_writer(writer);
        wtr.write_record(["Section", "Label", "Amount", "Percentage"])?;

        let summary = [
            ("Total Income", self.total_income),
            ("Total Expenses", self.total_expenses),
            ("Net Savings", self.net_savings),
        ];
        for (label, amount) in summary {
            wtr.write_record(["Summary", label, amount.to_string().as_str(), ""])?;
        }
        wtr.write_record([
            "Summary",
            "Savings Rate",
            "",
            format!("{:.2}", self.savings_rate).as_str(),
        ])?;

        for row in &self.expense_breakdown {
            wtr.write_record([
                "Expenses",
                row.key.as_str(),
                row.amount.to_string().as_str(),
                format!("{:.2}", row.percentage).as_str(),
            ])?;
        }
        for row in &self.income_breakdown {
            wtr.write_record([
                "Income",
                row.key.as_str(),
                row.amount.to_string().as_str(),
                format!("{:.2}", row.percentage).as_str(),
            ])?;
        }
        for bucket in &self.expense_trend {
            wtr.write_record([
                "Expense Trend",
                bucket.label().as_str(),
                bucket.amount.to_string().as_str(),
                "",
            ])?;
        }
        for bucket in &self.income_trend {
            wtr.write_record([
                "Income Trend",
                bucket.label().as_str(),
                bucket.amount.to_string().as_str(),
                "",
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

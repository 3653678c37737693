//! Cash-flow trend report
//!
//! Month-by-month income against expenses for the most recent months that
//! have any activity.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::analytics::{month_buckets, savings_rate};
use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::FintrackResult;
use crate::export::csv::quoted_writer;
use crate::models::{CurrencyFormatter, FinanceSnapshot, Money, Month};

/// Income and expenses for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashFlowPoint {
    pub month: Month,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
    pub savings_rate: f64,
}

/// Cash flow over the trailing window of active months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    /// Maximum number of months requested
    pub window: usize,
    /// Points in ascending month order
    pub points: Vec<CashFlowPoint>,
    /// Mean monthly income over the points
    pub average_income: Money,
    /// Mean monthly expenses over the points
    pub average_expenses: Money,
}

impl TrendReport {
    /// Build the trend for the latest `window` months with income or expenses
    pub fn generate(snapshot: &FinanceSnapshot, window: usize) -> Self {
        let points = cash_flow(snapshot, window);

        let (average_income, average_expenses) = if points.is_empty() {
            (Money::zero(), Money::zero())
        } else {
            let n = points.len() as f64;
            let income: Money = points.iter().map(|p| p.income).sum();
            let expenses: Money = points.iter().map(|p| p.expenses).sum();
            (income.scale(1.0 / n), expenses.scale(1.0 / n))
        };

        Self {
            window,
            points,
            average_income,
            average_expenses,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, fmt: &CurrencyFormatter) -> String {
        let mut output = String::new();

        output.push_str(&format!("Cash Flow Trend (last {} months)\n", self.window));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.points.is_empty() {
            output.push_str("No income or expenses recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14} {:>8}  {}\n",
            "Month", "Income", "Expenses", "Net", "Saved", "Spending"
        ));
        output.push_str(&separator(72));
        output.push('\n');

        let max_expense = self
            .points
            .iter()
            .map(|p| p.expenses.as_f64())
            .fold(0.0, f64::max);

        for point in &self.points {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14} {:>8}  {}\n",
                point.month.short_label(),
                fmt.format(point.income),
                fmt.format(point.expenses),
                fmt.format(point.net),
                format_percentage(point.savings_rate),
                format_bar(point.expenses.as_f64(), max_expense, 12)
            ));
        }

        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&format!(
            "Average income: {}   Average expenses: {}\n",
            fmt.format(self.average_income),
            fmt.format(self.average_expenses)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        let mut wtr = quoted_writer(writer);
        wtr.write_record(["Month", "Income", "Expenses", "Net", "Savings Rate"])?;

        for point in &self.points {
            wtr.write_record([
                point.month.to_string(),
                point.income.to_string(),
                point.expenses.to_string(),
                point.net.to_string(),
                format!("{:.2}", point.savings_rate),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Merge monthly income and expense buckets and keep the latest `window`
pub fn cash_flow(snapshot: &FinanceSnapshot, window: usize) -> Vec<CashFlowPoint> {
    let expenses = month_buckets(&snapshot.expenses, |e| e.date, |e| e.amount, usize::MAX);
    let income = month_buckets(&snapshot.income, |i| i.date, |i| i.amount, usize::MAX);

    let mut months: BTreeMap<Month, (Money, Money)> = BTreeMap::new();
    for bucket in income {
        months.entry(bucket.month).or_default().0 += bucket.amount;
    }
    for bucket in expenses {
        months.entry(bucket.month).or_default().1 += bucket.amount;
    }

    let skip = months.len().saturating_sub(window);
    months
        .into_iter()
        .skip(skip)
        .map(|(month, (income, expenses))| CashFlowPoint {
            month,
            income,
            expenses,
            net: income - expenses,
            savings_rate: savings_rate(income, expenses),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ratios::assert_close;
    use crate::models::{Expense, Income, IncomeSource};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> FinanceSnapshot {
        let mut snapshot = FinanceSnapshot::default();
        snapshot.income.push(Income::new(
            Money::from_units(1000),
            IncomeSource::Salary,
            date(2025, 1, 1),
        ));
        snapshot
            .expenses
            .push(Expense::new(Money::from_units(400), "Food", date(2025, 1, 12)));
        snapshot
            .expenses
            .push(Expense::new(Money::from_units(300), "Bills", date(2025, 3, 2)));
        snapshot
    }

    #[test]
    fn test_cash_flow_merges_months() {
        let points = cash_flow(&snapshot(), 6);
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].month, Month::new(2025, 1).unwrap());
        assert_eq!(points[0].net, Money::from_units(600));
        assert_close(points[0].savings_rate, 60.0);

        // Month with expenses but no income
        assert_eq!(points[1].month, Month::new(2025, 3).unwrap());
        assert_eq!(points[1].income, Money::zero());
        assert_close(points[1].savings_rate, 0.0);
    }

    #[test]
    fn test_window_keeps_latest_months() {
        let points = cash_flow(&snapshot(), 1);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].month, Month::new(2025, 3).unwrap());
        assert!(cash_flow(&snapshot(), 0).is_empty());
    }

    #[test]
    fn test_averages() {
        let report = TrendReport::generate(&snapshot(), 6);
        assert_eq!(report.average_income, Money::from_units(500));
        assert_eq!(report.average_expenses, Money::from_units(350));
    }

    #[test]
    fn test_empty_snapshot() {
        let report = TrendReport::generate(&FinanceSnapshot::default(), 6);
        assert!(report.points.is_empty());
        assert!(report
            .format_terminal(&CurrencyFormatter::default())
            .contains("No income or expenses"));
    }

    #[test]
    fn test_export_csv() {
        let report = TrendReport::generate(&snapshot(), 6);
        let mut output = Vec::new();
        report.export_csv(&mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        assert!(csv.starts_with("\"Month\",\"Income\""));
        assert!(csv.contains("\"2025-01\",\"1000.00\",\"400.00\",\"600.00\",\"60.00\""));
    }
}

//! Portfolio Report
//!
//! Per-holding gains, allocation by asset class and best/worst performers.
//! Values are whatever the user last entered; nothing is fetched.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use crate::analytics::{gain_loss, group_totals, total, GainLoss};
use crate::display::report::{format_bar, format_percentage, separator, truncate};
use crate::error::FintrackResult;
use crate::export::csv::quoted_writer;
use crate::models::{CurrencyFormatter, FinanceSnapshot, InvestmentId, InvestmentType, Money};

use super::dashboard::{breakdown_rows, BreakdownRow};

/// One holding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingRow {
    pub id: InvestmentId,
    pub name: String,
    pub investment_type: InvestmentType,
    pub purchase_date: NaiveDate,
    pub initial_amount: Money,
    pub current_value: Money,
    pub gain: GainLoss,
    /// Share of the portfolio's current value
    pub allocation: f64,
}

/// Portfolio Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    /// Holdings by descending current value
    pub holdings: Vec<HoldingRow>,
    pub total_invested: Money,
    pub total_value: Money,
    pub total_gain: GainLoss,
    /// Current value per asset class, largest first
    pub allocation: Vec<BreakdownRow>,
    /// Highest percentage gain; ties go to the larger holding
    pub best_performer: Option<HoldingRow>,
    /// Lowest percentage gain
    pub worst_performer: Option<HoldingRow>,
}

impl PortfolioReport {
    /// Generate the report over every investment in the snapshot
    pub fn generate(snapshot: &FinanceSnapshot) -> Self {
        let investments = &snapshot.investments;
        let total_invested = total(investments, |i| i.initial_amount);
        let total_value = total(investments, |i| i.current_value);

        let mut holdings: Vec<HoldingRow> = investments
            .iter()
            .map(|inv| HoldingRow {
                id: inv.id,
                name: inv.name.clone(),
                investment_type: inv.investment_type,
                purchase_date: inv.purchase_date,
                initial_amount: inv.initial_amount,
                current_value: inv.current_value,
                gain: gain_loss(inv.current_value, inv.initial_amount),
                allocation: crate::analytics::percentage(inv.current_value, total_value),
            })
            .collect();
        holdings.sort_by(|a, b| b.current_value.cmp(&a.current_value));

        let by_type = group_totals(
            investments,
            |i| Some(i.investment_type.label()),
            |i| i.current_value,
        );

        let mut best: Option<&HoldingRow> = None;
        let mut worst: Option<&HoldingRow> = None;
        for holding in &holdings {
            if best.map_or(true, |b| holding.gain.percent > b.gain.percent) {
                best = Some(holding);
            }
            if worst.map_or(true, |w| holding.gain.percent < w.gain.percent) {
                worst = Some(holding);
            }
        }
        let best_performer = best.cloned();
        let worst_performer = worst.cloned();

        Self {
            holdings,
            total_invested,
            total_value,
            total_gain: gain_loss(total_value, total_invested),
            allocation: breakdown_rows(&by_type),
            best_performer,
            worst_performer,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, fmt: &CurrencyFormatter) -> String {
        let mut output = String::new();

        output.push_str("Investment Portfolio\n");
        output.push_str(&"=".repeat(84));
        output.push('\n');

        if self.holdings.is_empty() {
            output.push_str("No investments recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<22} {:<14} {:>14} {:>14} {:>14} {:>8}\n",
            "Name", "Type", "Invested", "Value", "Gain/Loss", "Return"
        ));
        output.push_str(&separator(84));
        output.push('\n');

        for holding in &self.holdings {
            output.push_str(&format!(
                "{:<22} {:<14} {:>14} {:>14} {:>14} {:>8}\n",
                truncate(&holding.name, 22),
                holding.investment_type.label(),
                fmt.format(holding.initial_amount),
                fmt.format(holding.current_value),
                fmt.format(holding.gain.absolute),
                format_percentage(holding.gain.percent)
            ));
        }

        output.push_str(&separator(84));
        output.push('\n');
        output.push_str(&format!(
            "{:<37} {:>14} {:>14} {:>14} {:>8}\n\n",
            "TOTAL",
            fmt.format(self.total_invested),
            fmt.format(self.total_value),
            fmt.format(self.total_gain.absolute),
            format_percentage(self.total_gain.percent)
        ));

        output.push_str("Allocation\n");
        for row in &self.allocation {
            output.push_str(&format!(
                "  {:<16} {:>14} {:>7}  {}\n",
                row.key,
                fmt.format(row.amount),
                format_percentage(row.percentage),
                format_bar(row.percentage, 100.0, 20)
            ));
        }

        if let (Some(best), Some(worst)) = (&self.best_performer, &self.worst_performer) {
            output.push('\n');
            output.push_str(&format!(
                "Best performer:  {} ({})\n",
                best.name,
                format_percentage(best.gain.percent)
            ));
            output.push_str(&format!(
                "Worst performer: {} ({})\n",
                worst.name,
                format_percentage(worst.gain.percent)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        let mut wtr = quoted_writer(writer);
        wtr.write_record([
            "Name",
            "Type",
            "Purchase Date",
            "Invested",
            "Current Value",
            "Gain/Loss",
            "Return %",
            "Allocation %",
        ])?;

        for holding in &self.holdings {
            wtr.write_record([
                holding.name.clone(),
                holding.investment_type.label().to_string(),
                holding.purchase_date.to_string(),
                holding.initial_amount.to_string(),
                holding.current_value.to_string(),
                holding.gain.absolute.to_string(),
                format!("{:.2}", holding.gain.percent),
                format!("{:.2}", holding.allocation),
            ])?;
        }

        wtr.write_record([
            "TOTAL".to_string(),
            String::new(),
            String::new(),
            self.total_invested.to_string(),
            self.total_value.to_string(),
            self.total_gain.absolute.to_string(),
            format!("{:.2}", self.total_gain.percent),
            "100.00".to_string(),
        ])?;

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ratios::assert_close;
    use crate::models::Investment;

    fn holding(name: &str, kind: InvestmentType, cost: i64, value: i64) -> Investment {
        let mut inv = Investment::new(
            name,
            kind,
            Money::from_units(cost),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        inv.revalue(Money::from_units(value));
        inv
    }

    fn snapshot() -> FinanceSnapshot {
        let mut snapshot = FinanceSnapshot::default();
        snapshot.investments = vec![
            holding("ACME", InvestmentType::Stocks, 1000, 1200),
            holding("Bond Fund", InvestmentType::Bonds, 2000, 1900),
            holding("Globex", InvestmentType::Stocks, 500, 900),
        ];
        snapshot
    }

    #[test]
    fn test_totals_and_gain() {
        let report = PortfolioReport::generate(&snapshot());
        assert_eq!(report.total_invested, Money::from_units(3500));
        assert_eq!(report.total_value, Money::from_units(4000));
        assert_eq!(report.total_gain.absolute, Money::from_units(500));

        let acme = report.holdings.iter().find(|h| h.name == "ACME").unwrap();
        assert_eq!(acme.gain.absolute, Money::from_units(200));
        assert_close(acme.gain.percent, 20.0);
        assert_close(acme.allocation, 30.0);
    }

    #[test]
    fn test_allocation_by_type() {
        let report = PortfolioReport::generate(&snapshot());
        assert_eq!(report.allocation.len(), 2);
        assert_eq!(report.allocation[0].key, "Stocks");
        assert_eq!(report.allocation[0].amount, Money::from_units(2100));
        assert_close(report.allocation[0].percentage, 52.5);
    }

    #[test]
    fn test_best_and_worst() {
        let report = PortfolioReport::generate(&snapshot());
        assert_eq!(report.best_performer.unwrap().name, "Globex");
        assert_eq!(report.worst_performer.unwrap().name, "Bond Fund");
    }

    #[test]
    fn test_holdings_sorted_by_value() {
        let report = PortfolioReport::generate(&snapshot());
        let names: Vec<&str> = report.holdings.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Bond Fund", "ACME", "Globex"]);
    }

    #[test]
    fn test_empty_portfolio() {
        let report = PortfolioReport::generate(&FinanceSnapshot::default());
        assert_close(report.total_gain.percent, 0.0);
        assert!(report.best_performer.is_none());
        assert!(report
            .format_terminal(&CurrencyFormatter::default())
            .contains("No investments recorded."));
    }

    #[test]
    fn test_export_csv() {
        let report = PortfolioReport::generate(&snapshot());
        let mut output = Vec::new();
        report.export_csv(&mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        assert!(csv.contains("\"ACME\",\"Stocks\",\"2024-01-15\",\"1000.00\",\"1200.00\",\"200.00\",\"20.00\",\"30.00\""));
        assert!(csv.lines().last().unwrap().starts_with("\"TOTAL\""));
    }
}

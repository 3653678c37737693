//! Recurring Overview
//!
//! Monthly equivalents of every recurring item and the resulting projected
//! monthly income and spending. Recurring items are descriptive only; no
//! expense or income records are ever created from them.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use crate::analytics::monthly_equivalent;
use crate::display::report::{separator, truncate};
use crate::error::FintrackResult;
use crate::export::csv::quoted_writer;
use crate::models::{
    CurrencyFormatter, FinanceSnapshot, Frequency, Money, RecurringId, RecurringKind,
};

/// One recurring item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringRow {
    pub id: RecurringId,
    pub name: String,
    pub kind: RecurringKind,
    pub frequency: Frequency,
    pub category: String,
    pub amount: Money,
    pub monthly_equivalent: Money,
    pub is_active: bool,
    /// Whether the item counts toward the projection on the report date
    pub in_effect: bool,
    pub next_occurrence: Option<NaiveDate>,
}

/// Recurring Overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringOverview {
    pub as_of: NaiveDate,
    /// Items by upcoming occurrence; items with none come last
    pub items: Vec<RecurringRow>,
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub monthly_net: Money,
    pub active_count: usize,
}

impl RecurringOverview {
    /// Generate the overview as seen on `as_of`
    ///
    /// Paused items and items whose end date has passed are listed but left
    /// out of the projection.
    pub fn generate(snapshot: &FinanceSnapshot, as_of: NaiveDate) -> Self {
        let mut items: Vec<RecurringRow> = snapshot
            .recurring
            .iter()
            .map(|item| RecurringRow {
                id: item.id,
                name: item.name.clone(),
                kind: item.kind,
                frequency: item.frequency,
                category: item.category.clone(),
                amount: item.amount,
                monthly_equivalent: monthly_equivalent(item.amount, item.frequency),
                is_active: item.is_active,
                in_effect: item.is_active && !item.has_ended(as_of),
                next_occurrence: item.next_occurrence(as_of),
            })
            .collect();

        items.sort_by(|a, b| match (a.next_occurrence, b.next_occurrence) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        });

        let projected = |kind: RecurringKind| -> Money {
            items
                .iter()
                .filter(|r| r.in_effect && r.kind == kind)
                .map(|r| r.monthly_equivalent)
                .sum()
        };
        let monthly_income = projected(RecurringKind::Income);
        let monthly_expenses = projected(RecurringKind::Expense);
        let active_count = items.iter().filter(|r| r.in_effect).count();

        Self {
            as_of,
            items,
            monthly_income,
            monthly_expenses,
            monthly_net: monthly_income - monthly_expenses,
            active_count,
        }
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self, fmt: &CurrencyFormatter) -> String {
        let mut output = String::new();

        output.push_str(&format!("Recurring Transactions (as of {})\n", self.as_of));
        output.push_str(&"=".repeat(82));
        output.push('\n');

        if self.items.is_empty() {
            output.push_str("No recurring transactions recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<22} {:<8} {:<8} {:>12} {:>12}  {:<10} {}\n",
            "Name", "Type", "Every", "Amount", "Per Month", "Next", "State"
        ));
        output.push_str(&separator(82));
        output.push('\n');

        for item in &self.items {
            let next = item
                .next_occurrence
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            let state = if !item.is_active {
                "paused"
            } else if !item.in_effect {
                "ended"
            } else {
                "active"
            };

            output.push_str(&format!(
                "{:<22} {:<8} {:<8} {:>12} {:>12}  {:<10} {}\n",
                truncate(&item.name, 22),
                item.kind.to_string(),
                item.frequency.to_string(),
                fmt.format(item.amount),
                fmt.format(item.monthly_equivalent),
                next,
                state
            ));
        }

        output.push_str(&separator(82));
        output.push('\n');
        output.push_str(&format!(
            "Projected monthly income:   {}\n",
            fmt.format(self.monthly_income)
        ));
        output.push_str(&format!(
            "Projected monthly expenses: {}\n",
            fmt.format(self.monthly_expenses)
        ));
        output.push_str(&format!(
            "Projected monthly net:      {}\n",
            fmt.format(self.monthly_net)
        ));

        output
    }

    /// Export the overview to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        let mut wtr = quoted_writer(writer);
        wtr.write_record([
            "Name",
            "Type",
            "Frequency",
            "Category",
            "Amount",
            "Monthly Equivalent",
            "Active",
            "Next Occurrence",
        ])?;

        for item in &self.items {
            wtr.write_record([
                item.name.clone(),
                item.kind.to_string(),
                item.frequency.to_string(),
                item.category.clone(),
                item.amount.to_string(),
                item.monthly_equivalent.to_string(),
                item.in_effect.to_string(),
                item.next_occurrence.map(|d| d.to_string()).unwrap_or_default(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecurringTransaction;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> FinanceSnapshot {
        let salary = RecurringTransaction::new(
            "Salary",
            Money::from_units(3000),
            RecurringKind::Income,
            Frequency::Monthly,
            date(2024, 1, 25),
        );
        let rent = RecurringTransaction::new(
            "Rent",
            Money::from_units(1200),
            RecurringKind::Expense,
            Frequency::Monthly,
            date(2024, 1, 1),
        );
        let gym = RecurringTransaction::new(
            "Gym",
            Money::from_units(100),
            RecurringKind::Expense,
            Frequency::Weekly,
            date(2025, 1, 6),
        );
        let mut paused = RecurringTransaction::new(
            "Magazine",
            Money::from_units(120),
            RecurringKind::Expense,
            Frequency::Yearly,
            date(2024, 3, 1),
        );
        paused.set_active(false);
        let ended = RecurringTransaction::new(
            "Old Loan",
            Money::from_units(500),
            RecurringKind::Expense,
            Frequency::Monthly,
            date(2023, 1, 1),
        )
        .with_end_date(date(2024, 12, 1));

        let mut snapshot = FinanceSnapshot::default();
        snapshot.recurring = vec![salary, rent, gym, paused, ended];
        snapshot
    }

    #[test]
    fn test_projection_excludes_paused_and_ended() {
        let overview = RecurringOverview::generate(&snapshot(), date(2025, 1, 10));
        assert_eq!(overview.monthly_income, Money::from_units(3000));
        // Rent plus weekly gym at 52/12 per month
        assert_eq!(overview.monthly_expenses, Money::from_cents(120000 + 43333));
        assert_eq!(overview.monthly_net, Money::from_cents(300000 - 163333));
        assert_eq!(overview.active_count, 3);
    }

    #[test]
    fn test_next_occurrences_sort_first() {
        let overview = RecurringOverview::generate(&snapshot(), date(2025, 1, 10));
        let gym = &overview.items[0];
        assert_eq!(gym.name, "Gym");
        assert_eq!(gym.next_occurrence, Some(date(2025, 1, 13)));

        let salary = overview.items.iter().find(|r| r.name == "Salary").unwrap();
        assert_eq!(salary.next_occurrence, Some(date(2025, 1, 25)));

        let last_two: Vec<&str> = overview.items[3..].iter().map(|r| r.name.as_str()).collect();
        assert_eq!(last_two, vec!["Magazine", "Old Loan"]);
    }

    #[test]
    fn test_terminal_states() {
        let overview = RecurringOverview::generate(&snapshot(), date(2025, 1, 10));
        let text = overview.format_terminal(&CurrencyFormatter::default());
        assert!(text.contains("paused"));
        assert!(text.contains("ended"));
        assert!(text.contains("Projected monthly net"));
    }

    #[test]
    fn test_empty_overview() {
        let overview =
            RecurringOverview::generate(&FinanceSnapshot::default(), date(2025, 1, 1));
        assert_eq!(overview.monthly_net, Money::zero());
        assert!(overview.items.is_empty());
    }
}

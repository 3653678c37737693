//! Budget Status Report
//!
//! Compares one month's spending against that month's budget, overall and
//! per category.

use serde::Serialize;
use std::io::Write;

use crate::analytics::{budget_utilization, filter_month, group_totals_with_fallback, total};
use crate::display::report::{format_percentage, progress_bar, separator};
use crate::error::{FintrackError, FintrackResult};
use crate::export::csv::quoted_writer;
use crate::models::{CurrencyFormatter, Expense, FinanceSnapshot, Money, Month};

/// Budget status of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStatusRow {
    pub category: String,
    /// Category limit; None when tracked without a limit or not budgeted at all
    pub budgeted: Option<Money>,
    pub spent: Money,
    pub remaining: Option<Money>,
    /// Uncapped; None when there is no limit to compare against
    pub utilization: Option<f64>,
    pub over_budget: bool,
    /// Whether the category appears in the budget at all
    pub in_budget: bool,
}

/// Budget Status Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatusReport {
    pub month: Month,
    pub total_budget: Money,
    pub total_spent: Money,
    pub remaining: Money,
    /// Uncapped; above 100 means over budget
    pub utilization: f64,
    pub over_budget: bool,
    /// Budgeted categories first, then categories with unbudgeted spending
    pub categories: Vec<CategoryStatusRow>,
}

impl BudgetStatusReport {
    /// Generate the report for `month`
    ///
    /// Fails with a not-found error when the month has no budget.
    pub fn generate(
        snapshot: &FinanceSnapshot,
        month: Month,
        fallback_category: &str,
    ) -> FintrackResult<Self> {
        let budget = snapshot
            .budget_for(month)
            .ok_or_else(|| FintrackError::budget_not_found(month.to_string()))?;

        let expenses: Vec<&Expense> = filter_month(&snapshot.expenses, |e| e.date, month);
        let total_spent = total(&expenses, |e| e.amount);
        let spent_by_category = group_totals_with_fallback(
            &expenses,
            |e| Some(e.category.as_str()),
            |e| e.amount,
            fallback_category,
        );

        let mut categories: Vec<CategoryStatusRow> = budget
            .categories
            .iter()
            .map(|(category, limit)| {
                let spent = spent_by_category.get(category).unwrap_or_default();
                category_row(category, *limit, spent, true)
            })
            .collect();

        for entry in spent_by_category.iter() {
            if !budget.categories.contains_key(&entry.key) {
                categories.push(category_row(&entry.key, None, entry.amount, false));
            }
        }

        let utilization = budget_utilization(total_spent, budget.total_budget);

        Ok(Self {
            month,
            total_budget: budget.total_budget,
            total_spent,
            remaining: budget.total_budget - total_spent,
            utilization,
            over_budget: total_spent > budget.total_budget,
            categories,
        })
    }

    /// Categories whose spending exceeds their limit
    pub fn overspent_categories(&self) -> Vec<&CategoryStatusRow> {
        self.categories.iter().filter(|c| c.over_budget).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, fmt: &CurrencyFormatter) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Status: {}\n", self.month.short_label()));
        output.push_str(&"=".repeat(78));
        output.push('\n');
        output.push_str(&format!("Budget:    {}\n", fmt.format(self.total_budget)));
        output.push_str(&format!("Spent:     {}\n", fmt.format(self.total_spent)));
        output.push_str(&format!("Remaining: {}\n", fmt.format(self.remaining)));
        output.push_str(&format!(
            "Used:      {} {}{}\n\n",
            progress_bar(self.utilization, 20),
            format_percentage(self.utilization),
            if self.over_budget { "  OVER BUDGET" } else { "" }
        ));

        output.push_str(&format!(
            "{:<18} {:>14} {:>14} {:>14} {:>8}\n",
            "Category", "Budgeted", "Spent", "Remaining", "Used"
        ));
        output.push_str(&separator(78));
        output.push('\n');

        for row in &self.categories {
            let budgeted = row
                .budgeted
                .map(|b| fmt.format(b))
                .unwrap_or_else(|| "-".to_string());
            let remaining = row
                .remaining
                .map(|r| fmt.format(r))
                .unwrap_or_else(|| "-".to_string());
            let used = row
                .utilization
                .map(format_percentage)
                .unwrap_or_else(|| "-".to_string());
            let marker = if row.over_budget {
                " !"
            } else if !row.in_budget {
                " *"
            } else {
                ""
            };

            output.push_str(&format!(
                "{:<18} {:>14} {:>14} {:>14} {:>8}{}\n",
                row.category,
                budgeted,
                fmt.format(row.spent),
                remaining,
                used,
                marker
            ));
        }

        let overspent = self.overspent_categories();
        if !overspent.is_empty() {
            let names: Vec<&str> = overspent.iter().map(|c| c.category.as_str()).collect();
            output.push_str(&format!("\n! over limit: {}\n", names.join(", ")));
        }
        if self.categories.iter().any(|c| !c.in_budget) {
            output.push_str("\n* spending in a category with no budget line\n");
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        let mut wtr = quoted_writer(writer);
        wtr.write_record([
            "Month",
            "Category",
            "Budgeted",
            "Spent",
            "Remaining",
            "Utilization",
            "Over Budget",
        ])?;

        let opt_money = |m: Option<Money>| m.map(|v| v.to_string()).unwrap_or_default();

        for row in &self.categories {
            wtr.write_record([
                self.month.to_string(),
                row.category.clone(),
                opt_money(row.budgeted),
                row.spent.to_string(),
                opt_money(row.remaining),
                row.utilization.map(|u| format!("{:.2}", u)).unwrap_or_default(),
                row.over_budget.to_string(),
            ])?;
        }

        wtr.write_record([
            self.month.to_string(),
            "TOTAL".to_string(),
            self.total_budget.to_string(),
            self.total_spent.to_string(),
            self.remaining.to_string(),
            format!("{:.2}", self.utilization),
            self.over_budget.to_string(),
        ])?;

        wtr.flush()?;
        Ok(())
    }
}

fn category_row(
    category: &str,
    limit: Option<Money>,
    spent: Money,
    in_budget: bool,
) -> CategoryStatusRow {
    CategoryStatusRow {
        category: category.to_string(),
        budgeted: limit,
        spent,
        remaining: limit.map(|l| l - spent),
        utilization: limit.map(|l| budget_utilization(spent, l)),
        over_budget: limit.is_some_and(|l| spent > l),
        in_budget,
    }
}

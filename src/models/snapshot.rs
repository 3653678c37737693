//! Point-in-time snapshot of every record
//!
//! Analytics and reports read only from a snapshot passed to them; they
//! never reach into storage or any shared state.

use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::expense::Expense;
use super::goal::Goal;
use super::income::Income;
use super::investment::Investment;
use super::month::Month;
use super::recurring::RecurringTransaction;
use super::split::SplitExpense;

/// Owned copies of all records at one moment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceSnapshot {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub income: Vec<Income>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub recurring: Vec<RecurringTransaction>,
    #[serde(default)]
    pub splits: Vec<SplitExpense>,
}

impl FinanceSnapshot {
    /// The budget for a month, if one is set
    pub fn budget_for(&self, month: Month) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.month == month)
    }

    /// Total number of records across all collections
    pub fn record_count(&self) -> usize {
        self.expenses.len()
            + self.income.len()
            + self.budgets.len()
            + self.investments.len()
            + self.goals.len()
            + self.recurring.len()
            + self.splits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncomeSource, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = FinanceSnapshot::default();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_budget_lookup_and_count() {
        let jan = Month::new(2025, 1).unwrap();
        let mut snapshot = FinanceSnapshot::default();
        snapshot.budgets.push(Budget::new(jan, Money::from_units(500)));
        snapshot.expenses.push(Expense::new(
            Money::from_units(10),
            "Food",
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        ));
        snapshot.income.push(Income::new(
            Money::from_units(100),
            IncomeSource::Salary,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        ));

        assert!(snapshot.budget_for(jan).is_some());
        assert!(snapshot.budget_for(jan.next()).is_none());
        assert_eq!(snapshot.record_count(), 3);
    }
}

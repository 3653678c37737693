//! [`Record`] implementations for the stored entities

use chrono::{DateTime, NaiveDate, Utc};

use crate::audit::EntityType;
use crate::models::{
    Budget, BudgetId, Expense, ExpenseId, Goal, GoalId, Income, IncomeId, Investment,
    InvestmentId, RecurringId, RecurringTransaction, SplitExpense, SplitId, ValidationError,
};

use super::collection::Record;

macro_rules! impl_record {
    ($ty:ty, $id:ty, $entity:expr, $date_field:ident) => {
        impl Record for $ty {
            type Id = $id;

            const ENTITY: EntityType = $entity;

            fn id(&self) -> $id {
                self.id
            }

            fn label(&self) -> String {
                self.to_string()
            }

            fn sort_date(&self) -> NaiveDate {
                self.$date_field
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }

            fn touch(&mut self) {
                self.updated_at = Utc::now();
            }

            fn validate_record(&self) -> Result<(), ValidationError> {
                self.validate()
            }

            fn matches(&self, input: &str) -> bool {
                self.id.matches_short(input)
            }
        }
    };
}

impl_record!(Expense, ExpenseId, EntityType::Expense, date);
impl_record!(Income, IncomeId, EntityType::Income, date);
impl_record!(Investment, InvestmentId, EntityType::Investment, purchase_date);
impl_record!(Goal, GoalId, EntityType::Goal, target_date);
impl_record!(RecurringTransaction, RecurringId, EntityType::Recurring, start_date);
impl_record!(SplitExpense, SplitId, EntityType::Split, date);

/// Budgets are also addressed by their month, and a month holds one budget
impl Record for Budget {
    type Id = BudgetId;

    const ENTITY: EntityType = EntityType::Budget;

    fn id(&self) -> BudgetId {
        self.id
    }

    fn label(&self) -> String {
        self.month.to_string()
    }

    fn sort_date(&self) -> NaiveDate {
        self.month.start_date()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn validate_record(&self) -> Result<(), ValidationError> {
        self.validate()
    }

    fn matches(&self, input: &str) -> bool {
        self.month.to_string() == input.trim() || self.id.matches_short(input)
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.month == other.month
    }
}

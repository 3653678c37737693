//! Core data models for fintrack
//!
//! This module contains the record types tracked by the application
//! (expenses, income, budgets, investments, goals, recurring items and
//! split bills) plus the value types they are built from.

pub mod budget;
pub mod category;
pub mod currency;
pub mod expense;
pub mod goal;
pub mod ids;
pub mod income;
pub mod investment;
pub mod money;
pub mod month;
pub mod recurring;
pub mod snapshot;
pub mod split;
pub mod validation;

pub use budget::Budget;
pub use category::{DEFAULT_EXPENSE_CATEGORIES, FALLBACK_CATEGORY};
pub use currency::{Currency, CurrencyFormatter};
pub use expense::{Expense, PaymentMethod};
pub use goal::{Goal, GoalPriority};
pub use ids::{BudgetId, ExpenseId, GoalId, IncomeId, InvestmentId, RecurringId, SplitId};
pub use income::{Income, IncomeSource};
pub use investment::{Investment, InvestmentType};
pub use money::Money;
pub use month::Month;
pub use recurring::{Frequency, RecurringKind, RecurringTransaction};
pub use snapshot::FinanceSnapshot;
pub use split::{Participant, SplitExpense, SplitStatus};
pub use validation::ValidationError;

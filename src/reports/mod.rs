//! Reports module for fintrack
//!
//! Each report is built from a `FinanceSnapshot`, formats itself for the
//! terminal and exports its rows as CSV.

pub mod budget_status;
pub mod dashboard;
pub mod goals;
pub mod portfolio;
pub mod recurring;
pub mod splits;
pub mod trend;

pub use budget_status::{BudgetStatusReport, CategoryStatusRow};
pub use dashboard::{breakdown_rows, BreakdownRow, DashboardSummary};
pub use goals::{GoalRow, GoalsReport};
pub use portfolio::{HoldingRow, PortfolioReport};
pub use recurring::{RecurringOverview, RecurringRow};
pub use splits::{ParticipantBalance, SplitRow, SplitsReport};
pub use trend::{cash_flow, CashFlowPoint, TrendReport};

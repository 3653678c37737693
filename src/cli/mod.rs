//! CLI command handlers
//!
//! Bridges clap argument parsing with storage, reports and export.

pub mod args;
pub mod audit;
pub mod budget;
pub mod config;
pub mod expense;
pub mod export;
pub mod goal;
pub mod income;
pub mod investment;
pub mod recurring;
pub mod report;
pub mod split;

pub use audit::{handle_audit_command, AuditArgs};
pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, handle_init_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use investment::{handle_investment_command, InvestmentCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use report::{handle_report_command, ReportCommands};
pub use split::{handle_split_command, SplitCommands};

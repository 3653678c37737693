//! Terminal presentation helpers
//!
//! `report` holds the text helpers reports are drawn with; `tables` renders
//! record lists.

pub mod report;
pub mod tables;

pub use tables::{
    budget_detail, budget_table, expense_table, goal_table, income_table, investment_table,
    recurring_table, split_table,
};

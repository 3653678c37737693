//! Analytics and aggregation
//!
//! Pure functions that turn slices of typed records into totals, grouped
//! breakdowns, month-bucketed series and ratios. Nothing here performs I/O
//! or reads shared state; callers pass a snapshot explicitly.

pub mod aggregate;
pub mod ratios;

pub use aggregate::{
    filter_month, group_totals, group_totals_with_fallback, month_buckets,
    top_key, total, GroupEntry, GroupTotals, MonthTotal, DEFAULT_TREND_WINDOW,
};
pub use ratios::{
    budget_utilization, gain_loss, goal_progress, monthly_equivalent, percentage, savings_rate,
    GainLoss,
};

//! Goals Report
//!
//! Progress toward each savings goal and the monthly saving needed to hit
//! its target date.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use crate::analytics::{goal_progress, total};
use crate::display::report::{format_percentage, progress_bar, separator, truncate};
use crate::error::FintrackResult;
use crate::export::csv::quoted_writer;
use crate::models::{CurrencyFormatter, FinanceSnapshot, GoalId, GoalPriority, Money, Month};

/// Progress of one goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalRow {
    pub id: GoalId,
    pub name: String,
    pub category: String,
    pub priority: GoalPriority,
    pub target_amount: Money,
    pub saved: Money,
    pub remaining: Money,
    /// Uncapped; above 100 when the goal was overfunded
    pub progress: f64,
    pub target_date: NaiveDate,
    /// Negative once the target date has passed
    pub days_left: i64,
    /// Saving per month needed from now to reach the target on time
    pub monthly_required: Money,
    pub completed: bool,
    pub overdue: bool,
}

/// Goals Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalsReport {
    pub as_of: NaiveDate,
    /// Open goals by priority then target date, completed goals last
    pub goals: Vec<GoalRow>,
    pub total_target: Money,
    pub total_saved: Money,
    pub overall_progress: f64,
    pub completed_count: usize,
}

impl GoalsReport {
    /// Generate the report as seen on `as_of`
    pub fn generate(snapshot: &FinanceSnapshot, as_of: NaiveDate) -> Self {
        let current_month = Month::of(as_of);

        let mut goals: Vec<GoalRow> = snapshot
            .goals
            .iter()
            .map(|goal| {
                let remaining = goal.remaining();
                let completed = goal.is_complete();
                let months_left = current_month.months_until(&Month::of(goal.target_date));

                // The current month counts, so a goal due this month needs everything now
                let monthly_required = if completed {
                    Money::zero()
                } else if months_left <= 0 {
                    remaining
                } else {
                    remaining.scale(1.0 / (months_left + 1) as f64)
                };

                GoalRow {
                    id: goal.id,
                    name: goal.name.clone(),
                    category: goal.category.clone(),
                    priority: goal.priority,
                    target_amount: goal.target_amount,
                    saved: goal.current_amount,
                    remaining,
                    progress: goal_progress(goal.current_amount, goal.target_amount),
                    target_date: goal.target_date,
                    days_left: (goal.target_date - as_of).num_days(),
                    monthly_required,
                    completed,
                    overdue: !completed && goal.target_date < as_of,
                }
            })
            .collect();

        goals.sort_by(|a, b| {
            a.completed
                .cmp(&b.completed)
                .then(b.priority.cmp(&a.priority))
                .then(a.target_date.cmp(&b.target_date))
        });

        let total_target = total(&snapshot.goals, |g| g.target_amount);
        let total_saved = total(&snapshot.goals, |g| g.current_amount);
        let completed_count = goals.iter().filter(|g| g.completed).count();

        Self {
            as_of,
            goals,
            total_target,
            total_saved,
            overall_progress: goal_progress(total_saved, total_target),
            completed_count,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, fmt: &CurrencyFormatter) -> String {
        let mut output = String::new();

        output.push_str(&format!("Savings Goals (as of {})\n", self.as_of));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.goals.is_empty() {
            output.push_str("No goals recorded.\n");
            return output;
        }

        for goal in &self.goals {
            let status = if goal.completed {
                "done".to_string()
            } else if goal.overdue {
                format!("overdue by {} days", -goal.days_left)
            } else {
                format!("{} days left", goal.days_left)
            };

            output.push_str(&format!(
                "{:<24} [{}] {:>7}  {}\n",
                truncate(&goal.name, 24),
                progress_bar(goal.progress, 20),
                format_percentage(goal.progress),
                goal.priority
            ));
            output.push_str(&format!(
                "    {} of {}, due {} ({})\n",
                fmt.format(goal.saved),
                fmt.format(goal.target_amount),
                goal.target_date,
                status
            ));
            if !goal.completed {
                output.push_str(&format!(
                    "    Save {} per month to stay on track\n",
                    fmt.format(goal.monthly_required)
                ));
            }
        }

        output.push_str(&separator(80));
        output.push('\n');
        output.push_str(&format!(
            "Overall: {} of {} ({}), {} of {} goals complete\n",
            fmt.format(self.total_saved),
            fmt.format(self.total_target),
            format_percentage(self.overall_progress),
            self.completed_count,
            self.goals.len()
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        let mut wtr = quoted_writer(writer);
        wtr.write_record([
            "Name",
            "Category",
            "Priority",
            "Target Date",
            "Target",
            "Saved",
            "Remaining",
            "Progress %",
            "Monthly Required",
            "Status",
        ])?;

        for goal in &self.goals {
            let status = if goal.completed {
                "Completed"
            } else if goal.overdue {
                "Overdue"
            } else {
                "Active"
            };
            wtr.write_record([
                goal.name.clone(),
                goal.category.clone(),
                goal.priority.to_string(),
                goal.target_date.to_string(),
                goal.target_amount.to_string(),
                goal.saved.to_string(),
                goal.remaining.to_string(),
                format!("{:.2}", goal.progress),
                goal.monthly_required.to_string(),
                status.to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

//! Savings goal CLI commands

use clap::Subcommand;

use crate::analytics::goal_progress;
use crate::config::Settings;
use crate::display::goal_table;
use crate::display::report::format_percentage;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Goal, GoalPriority};
use crate::storage::Storage;

use super::args::{parse_amount, parse_date};

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Name (e.g., "Emergency fund")
        name: String,
        /// Target amount
        target: String,
        /// Target date (YYYY-MM-DD)
        date: String,
        /// Category (e.g., "Travel")
        #[arg(short, long)]
        category: Option<String>,
        /// Priority: low, medium, high
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },

    /// Add savings to a goal
    Contribute {
        /// Goal ID (full or short form)
        id: String,
        /// Amount saved
        amount: String,
        /// Take the amount out instead
        #[arg(long)]
        withdraw: bool,
    },

    /// List goals
    List,

    /// Delete a goal
    Delete {
        /// Goal ID (full or short form)
        id: String,
    },
}

pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> FintrackResult<()> {
    let fmt = settings.formatter();

    match cmd {
        GoalCommands::Add {
            name,
            target,
            date,
            category,
            priority,
        } => {
            let target = parse_amount(&target)?;
            let date = parse_date(&date, &settings.date_format)?;
            let priority: GoalPriority = priority
                .parse()
                .map_err(|e| FintrackError::Validation(format!("{}", e)))?;

            let mut goal = Goal::new(name.trim(), target, date).with_priority(priority);
            if let Some(category) = category {
                goal = goal.with_category(category.trim());
            }

            let goal = storage.create(&storage.goals, goal)?;
            println!(
                "Added goal {}: {} of {} by {}",
                goal.id,
                goal.name,
                fmt.format(goal.target_amount),
                goal.target_date.format(&settings.date_format)
            );
        }

        GoalCommands::Contribute {
            id,
            amount,
            withdraw,
        } => {
            let amount = parse_amount(&amount)?;
            let mut goal = storage.goals.find(&id)?;
            goal.contribute(if withdraw { -amount } else { amount });
            let goal = storage.update(&storage.goals, goal)?;

            println!(
                "{}: {} of {} saved ({})",
                goal.name,
                fmt.format(goal.current_amount),
                fmt.format(goal.target_amount),
                format_percentage(goal_progress(goal.current_amount, goal.target_amount))
            );
            if goal.is_complete() {
                println!("Goal reached!");
            }
        }

        GoalCommands::List => {
            println!("{}", goal_table(&storage.goals.get_all()?, &fmt));
        }

        GoalCommands::Delete { id } => {
            let goal = storage.goals.find(&id)?;
            let removed = storage.delete(&storage.goals, goal.id)?;
            println!("Deleted goal {} ({})", removed.id, removed.name);
        }
    }

    Ok(())
}

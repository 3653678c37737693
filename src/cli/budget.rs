//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{budget_detail, budget_table};
use crate::error::{FintrackError, FintrackResult};
use crate::models::Budget;
use crate::storage::Storage;

use super::args::{parse_amount, parse_month_or_current, parse_named_amount};

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create or change the budget for a month
    Set {
        /// Month (YYYY-MM, "current", "next"; defaults to current)
        #[arg(short, long)]
        month: Option<String>,
        /// Total budget for the month (required for a new budget)
        #[arg(short, long)]
        total: Option<String>,
        /// Category limit as NAME=AMOUNT, or NAME to track without a limit
        #[arg(short, long = "category")]
        categories: Vec<String>,
        /// Stop tracking a category
        #[arg(long = "remove")]
        remove: Vec<String>,
    },

    /// Show one month's budget and category limits
    Show {
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List all budgets
    List,
}

pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FintrackResult<()> {
    let fmt = settings.formatter();

    match cmd {
        BudgetCommands::Set {
            month,
            total,
            categories,
            remove,
        } => {
            let month = parse_month_or_current(month.as_deref())?;
            let total = total.as_deref().map(parse_amount).transpose()?;
            let limits = categories
                .iter()
                .map(|c| parse_named_amount(c))
                .collect::<FintrackResult<Vec<_>>>()?;

            let existing = storage
                .budgets
                .get_all()?
                .into_iter()
                .find(|b| b.month == month);

            let mut budget = match (existing.clone(), total) {
                (Some(budget), _) => budget,
                (None, Some(total)) => Budget::new(month, total),
                (None, None) => {
                    return Err(FintrackError::Validation(format!(
                        "No budget for {} yet; pass --total to create one",
                        month
                    )))
                }
            };

            if let Some(total) = total {
                budget.set_total(total);
            }
            for (category, limit) in limits {
                budget.set_category(category, limit);
            }
            for category in &remove {
                if !budget.remove_category(category) {
                    log::warn!("{} budget has no category '{}'", month, category);
                }
            }

            let budget = if existing.is_some() {
                storage.update(&storage.budgets, budget)?
            } else {
                storage.create(&storage.budgets, budget)?
            };

            println!("{}", budget_detail(&budget, &fmt));
            if budget.unallocated().is_negative() {
                println!(
                    "Warning: category limits exceed the total by {}",
                    fmt.format(-budget.unallocated())
                );
            }
        }

        BudgetCommands::Show { month } => {
            let month = parse_month_or_current(month.as_deref())?;
            let budget = storage.budgets.find(&month.to_string())?;
            println!("{}", budget_detail(&budget, &fmt));
        }

        BudgetCommands::List => {
            println!("{}", budget_table(&storage.budgets.get_all()?, &fmt));
        }
    }

    Ok(())
}

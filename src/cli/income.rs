//! Income CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::income_table;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Income, IncomeSource};
use crate::storage::Storage;

use super::args::{parse_amount, parse_date_or_today, parse_month};

#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record income
    Add {
        /// Amount (e.g., "3000")
        amount: String,
        /// Source: salary, freelance, investment, gift, bonus, other
        #[arg(short, long, default_value = "salary")]
        source: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Optional category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List income, most recent first
    List {
        /// Only this month (YYYY-MM, "current", "last")
        #[arg(short, long)]
        month: Option<String>,
        /// Maximum number of rows
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete an income entry
    Delete {
        /// Income ID (full or short form)
        id: String,
    },
}

pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> FintrackResult<()> {
    match cmd {
        IncomeCommands::Add {
            amount,
            source,
            date,
            description,
            category,
        } => {
            let amount = parse_amount(&amount)?;
            let source: IncomeSource = source
                .parse()
                .map_err(|e| FintrackError::Validation(format!("{}", e)))?;
            let date = parse_date_or_today(date.as_deref(), &settings.date_format)?;

            let mut income = Income::new(amount, source, date);
            if let Some(description) = description {
                income = income.with_description(description);
            }
            if let Some(category) = category.filter(|c| !c.trim().is_empty()) {
                income = income.with_category(category.trim());
            }

            let income = storage.create(&storage.income, income)?;
            println!(
                "Added income {}: {} from {} on {}",
                income.id,
                settings.formatter().format(income.amount),
                income.source,
                income.date.format(&settings.date_format)
            );
        }

        IncomeCommands::List { month, limit } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let mut income: Vec<Income> = storage
                .income
                .get_all()?
                .into_iter()
                .filter(|i| month.map_or(true, |m| m.contains(i.date)))
                .collect();
            income.reverse();
            income.truncate(limit);

            println!("{}", income_table(&income, &settings.formatter()));
        }

        IncomeCommands::Delete { id } => {
            let income = storage.income.find(&id)?;
            let removed = storage.delete(&storage.income, income.id)?;
            println!("Deleted income {} ({})", removed.id, removed);
        }
    }

    Ok(())
}

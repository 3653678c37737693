//! Recurring transaction CLI commands
//!
//! Recurring items describe expected income and spending; they never create
//! expense or income entries themselves.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::recurring_table;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Frequency, RecurringKind, RecurringTransaction};
use crate::storage::Storage;

use super::args::{parse_amount, parse_date, parse_date_or_today};

#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Add a recurring item
    Add {
        /// Name (e.g., "Rent")
        name: String,
        /// Amount per occurrence
        amount: String,
        /// Kind: expense or income
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Frequency: daily, weekly, monthly, yearly
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
        /// First occurrence (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        start: Option<String>,
        /// Last possible occurrence
        #[arg(short, long)]
        end: Option<String>,
        /// Category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Pause or resume an item
    Toggle {
        /// Recurring ID (full or short form)
        id: String,
    },

    /// List recurring items
    List,

    /// Delete a recurring item
    Delete {
        /// Recurring ID (full or short form)
        id: String,
    },
}

pub fn handle_recurring_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecurringCommands,
) -> FintrackResult<()> {
    let fmt = settings.formatter();

    match cmd {
        RecurringCommands::Add {
            name,
            amount,
            kind,
            frequency,
            start,
            end,
            category,
        } => {
            let amount = parse_amount(&amount)?;
            let kind: RecurringKind = kind
                .parse()
                .map_err(|e| FintrackError::Validation(format!("{}", e)))?;
            let frequency: Frequency = frequency
                .parse()
                .map_err(|e| FintrackError::Validation(format!("{}", e)))?;
            let start = parse_date_or_today(start.as_deref(), &settings.date_format)?;

            let mut item = RecurringTransaction::new(name.trim(), amount, kind, frequency, start);
            if let Some(end) = end {
                item = item.with_end_date(parse_date(&end, &settings.date_format)?);
            }
            if let Some(category) = category {
                item = item.with_category(category.trim());
            }

            let item = storage.create(&storage.recurring, item)?;
            println!(
                "Added recurring {} {}: {} {} from {}",
                item.kind,
                item.id,
                fmt.format(item.amount),
                item.frequency,
                item.start_date.format(&settings.date_format)
            );
        }

        RecurringCommands::Toggle { id } => {
            let mut item = storage.recurring.find(&id)?;
            item.set_active(!item.is_active);
            let item = storage.update(&storage.recurring, item)?;
            let state = if item.is_active { "resumed" } else { "paused" };
            println!("{} {}", item.name, state);
        }

        RecurringCommands::List => {
            println!("{}", recurring_table(&storage.recurring.get_all()?, &fmt));
        }

        RecurringCommands::Delete { id } => {
            let item = storage.recurring.find(&id)?;
            let removed = storage.delete(&storage.recurring, item.id)?;
            println!("Deleted recurring {} ({})", removed.id, removed.name);
        }
    }

    Ok(())
}

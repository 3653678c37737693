//! Split expense CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::split_table;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Participant, SplitExpense};
use crate::storage::Storage;

use super::args::{parse_amount, parse_date_or_today, parse_named_amount};

#[derive(Subcommand)]
pub enum SplitCommands {
    /// Split a bill
    ///
    /// List participants by name to split evenly, or as NAME=AMOUNT to give
    /// every share explicitly.
    Add {
        /// What the bill was for
        description: String,
        /// Total amount
        amount: String,
        /// Participants
        #[arg(required = true)]
        participants: Vec<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Mark a participant's share (or every share) as paid
    Settle {
        /// Split ID (full or short form)
        id: String,
        /// Participant name; omit to settle everyone
        name: Option<String>,
    },

    /// List split expenses
    List {
        /// Hide fully settled splits
        #[arg(long)]
        open: bool,
    },

    /// Delete a split expense
    Delete {
        /// Split ID (full or short form)
        id: String,
    },
}

pub fn handle_split_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SplitCommands,
) -> FintrackResult<()> {
    let fmt = settings.formatter();

    match cmd {
        SplitCommands::Add {
            description,
            amount,
            participants,
            date,
        } => {
            let total = parse_amount(&amount)?;
            let date = parse_date_or_today(date.as_deref(), &settings.date_format)?;
            let shares = participants
                .iter()
                .map(|p| parse_named_amount(p))
                .collect::<FintrackResult<Vec<_>>>()?;

            let explicit = shares.iter().filter(|(_, amount)| amount.is_some()).count();
            let split = if explicit == 0 {
                let names: Vec<String> = shares.into_iter().map(|(name, _)| name).collect();
                SplitExpense::equal(description.trim(), total, date, &names)
            } else if explicit == shares.len() {
                let participants = shares
                    .into_iter()
                    .map(|(name, amount)| Participant::new(name, amount.unwrap_or_default()))
                    .collect();
                SplitExpense::new(description.trim(), total, date, participants)
            } else {
                return Err(FintrackError::Validation(
                    "Give every participant a share, or none of them".into(),
                ));
            };

            let split = storage.create(&storage.splits, split)?;
            println!(
                "Added split {}: {} between {} people",
                split.id,
                fmt.format(split.total_amount),
                split.participants.len()
            );
        }

        SplitCommands::Settle { id, name } => {
            let mut split = storage.splits.find(&id)?;
            match &name {
                Some(name) => {
                    if !split.settle(name) {
                        return Err(FintrackError::not_found("Participant", name.as_str()));
                    }
                }
                None => split.settle_all(),
            }

            let split = storage.update(&storage.splits, split)?;
            println!(
                "{}: {} ({} outstanding)",
                split.description,
                split.derive_status(),
                fmt.format(split.outstanding_amount())
            );
        }

        SplitCommands::List { open } => {
            let splits: Vec<SplitExpense> = storage
                .splits
                .get_all()?
                .into_iter()
                .filter(|s| !open || s.outstanding_amount().is_positive())
                .collect();
            println!("{}", split_table(&splits, &fmt));
        }

        SplitCommands::Delete { id } => {
            let split = storage.splits.find(&id)?;
            let removed = storage.delete(&storage.splits, split.id)?;
            println!("Deleted split {} ({})", removed.id, removed.description);
        }
    }

    Ok(())
}

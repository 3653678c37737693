//! Expense CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense_table;
use crate::error::{FintrackError, FintrackResult};
use crate::models::category::is_default_expense_category;
use crate::models::{Expense, PaymentMethod};
use crate::storage::Storage;

use super::args::{parse_amount, parse_date_or_today, parse_month};

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category (e.g., "Food")
        category: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Payment method: cash, card, upi, bank, wallet
        #[arg(short, long, default_value = "cash")]
        payment: String,
    },

    /// List expenses, most recent first
    List {
        /// Only this month (YYYY-MM, "current", "last")
        #[arg(short, long)]
        month: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum number of rows
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (full or short form)
        id: String,
    },
}

pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> FintrackResult<()> {
    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
            payment,
        } => {
            let amount = parse_amount(&amount)?;
            let date = parse_date_or_today(date.as_deref(), &settings.date_format)?;
            let method: PaymentMethod = payment
                .parse()
                .map_err(|e| FintrackError::Validation(format!("{}", e)))?;

            let mut expense = Expense::new(amount, category.trim(), date).with_payment_method(method);
            if let Some(description) = description {
                expense = expense.with_description(description);
            }

            if !is_default_expense_category(&category) {
                log::info!("'{}' is not one of the default categories", category.trim());
            }

            let expense = storage.create(&storage.expenses, expense)?;
            println!(
                "Added expense {}: {} for {} on {}",
                expense.id,
                settings.formatter().format(expense.amount),
                expense.category,
                expense.date.format(&settings.date_format)
            );
        }

        ExpenseCommands::List {
            month,
            category,
            limit,
        } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let mut expenses: Vec<Expense> = storage
                .expenses
                .get_all()?
                .into_iter()
                .filter(|e| month.map_or(true, |m| m.contains(e.date)))
                .filter(|e| category.as_deref().map_or(true, |c| e.category == c))
                .collect();
            expenses.reverse();
            expenses.truncate(limit);

            println!("{}", expense_table(&expenses, &settings.formatter()));
        }

        ExpenseCommands::Delete { id } => {
            let expense = storage.expenses.find(&id)?;
            let removed = storage.delete(&storage.expenses, expense.id)?;
            println!("Deleted expense {} ({})", removed.id, removed);
        }
    }

    Ok(())
}

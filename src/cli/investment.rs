//! Investment CLI commands

use clap::Subcommand;

use crate::analytics::gain_loss;
use crate::config::Settings;
use crate::display::investment_table;
use crate::display::report::format_percentage;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Investment, InvestmentType};
use crate::storage::Storage;

use super::args::{parse_amount, parse_date_or_today};

#[derive(Subcommand)]
pub enum InvestmentCommands {
    /// Record a holding
    Add {
        /// Name (e.g., "Index Fund")
        name: String,
        /// Amount invested; omit when giving --quantity and --unit-price
        amount: Option<String>,
        /// Type: stocks, bonds, mutual_fund, crypto, real_estate, fixed_deposit, other
        #[arg(short = 't', long = "type", default_value = "stocks")]
        investment_type: String,
        /// Purchase date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Units bought
        #[arg(short, long, requires = "unit_price")]
        quantity: Option<f64>,
        /// Price per unit
        #[arg(short, long, requires = "quantity")]
        unit_price: Option<String>,
    },

    /// Record a holding's current value
    Update {
        /// Investment ID (full or short form)
        id: String,
        /// Current value
        value: String,
    },

    /// List holdings
    List,

    /// Delete a holding
    Delete {
        /// Investment ID (full or short form)
        id: String,
    },
}

pub fn handle_investment_command(
    storage: &Storage,
    settings: &Settings,
    cmd: InvestmentCommands,
) -> FintrackResult<()> {
    let fmt = settings.formatter();

    match cmd {
        InvestmentCommands::Add {
            name,
            amount,
            investment_type,
            date,
            quantity,
            unit_price,
        } => {
            let investment_type: InvestmentType = investment_type
                .parse()
                .map_err(|e| FintrackError::Validation(format!("{}", e)))?;
            let date = parse_date_or_today(date.as_deref(), &settings.date_format)?;

            let investment = match (amount, quantity, unit_price) {
                (_, Some(quantity), Some(price)) => {
                    Investment::new(name.trim(), investment_type, Default::default(), date)
                        .with_units(quantity, parse_amount(&price)?)
                }
                (Some(amount), _, _) => {
                    Investment::new(name.trim(), investment_type, parse_amount(&amount)?, date)
                }
                _ => {
                    return Err(FintrackError::Validation(
                        "Give an amount, or both --quantity and --unit-price".into(),
                    ))
                }
            };

            let investment = storage.create(&storage.investments, investment)?;
            println!(
                "Added investment {}: {} ({}) for {}",
                investment.id,
                investment.name,
                investment.investment_type,
                fmt.format(investment.initial_amount)
            );
        }

        InvestmentCommands::Update { id, value } => {
            let mut investment = storage.investments.find(&id)?;
            investment.revalue(parse_amount(&value)?);
            let investment = storage.update(&storage.investments, investment)?;

            let gain = gain_loss(investment.current_value, investment.initial_amount);
            let direction = if gain.is_loss() { "loss" } else { "gain" };
            println!(
                "{} is now worth {} ({} {}, {})",
                investment.name,
                fmt.format(investment.current_value),
                direction,
                fmt.format(gain.absolute.abs()),
                format_percentage(gain.percent)
            );
        }

        InvestmentCommands::List => {
            println!("{}", investment_table(&storage.investments.get_all()?, &fmt));
        }

        InvestmentCommands::Delete { id } => {
            let investment = storage.investments.find(&id)?;
            let removed = storage.delete(&storage.investments, investment.id)?;
            println!("Deleted investment {} ({})", removed.id, removed.name);
        }
    }

    Ok(())
}

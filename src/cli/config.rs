//! Init and config CLI commands

use clap::Subcommand;

use crate::config::{FintrackPaths, Settings};
use crate::error::FintrackResult;
use crate::storage::initialize_storage;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show settings and file locations
    Show,

    /// Change a setting
    Set {
        /// One of the setting keys, or rate.<CODE> for an exchange rate
        key: String,
        value: String,
    },
}

pub fn handle_init_command(paths: &FintrackPaths, settings: &Settings) -> FintrackResult<()> {
    println!("Initializing fintrack at: {}", paths.base_dir().display());

    if initialize_storage(paths, settings)? {
        println!("Initialization complete!");
        println!();
        println!("Base currency: {}", settings.base_currency);
        println!("Run 'fintrack expense add <amount> <category>' to record spending.");
    } else {
        println!("Already initialized; existing data and settings were kept.");
    }
    Ok(())
}

pub fn handle_config_command(
    paths: &FintrackPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> FintrackResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("{}", settings.describe());
        }

        ConfigCommands::Set { key, value } => {
            settings.set_value(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}

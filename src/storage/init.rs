//! First-run setup

use crate::config::{FintrackPaths, Settings};
use crate::error::FintrackError;

use super::file_io::write_json_atomic;

/// Create the data directory, an empty file per collection and the
/// settings file
///
/// Existing files are left alone. Returns `true` when settings were written
/// for the first time.
pub fn initialize_storage(paths: &FintrackPaths, settings: &Settings) -> Result<bool, FintrackError> {
    paths.ensure_directories()?;

    let empty = serde_json::json!({ "records": [] });
    for file in [
        paths.expenses_file(),
        paths.income_file(),
        paths.budgets_file(),
        paths.investments_file(),
        paths.goals_file(),
        paths.recurring_file(),
        paths.splits_file(),
    ] {
        if !file.exists() {
            write_json_atomic(&file, &empty)?;
            log::debug!("Created {}", file.display());
        }
    }

    if paths.is_initialized() {
        return Ok(false);
    }

    settings.save(paths)?;
    log::info!("Initialized fintrack at {}", paths.base_dir().display());
    Ok(true)
}

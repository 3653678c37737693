//! Audit log CLI command

use clap::Args;

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::storage::Storage;

#[derive(Args)]
pub struct AuditArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,

    /// Only changes to one kind of record (expense, income, budget, ...)
    #[arg(short, long)]
    pub entity: Option<String>,

    /// Print raw JSON lines
    #[arg(long)]
    pub json: bool,
}

pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> FintrackResult<()> {
    let entity = args
        .entity
        .as_deref()
        .map(|e| e.parse::<EntityType>())
        .transpose()
        .map_err(|e| FintrackError::Validation(format!("{}", e)))?;

    let entries = storage.audit().read_recent(args.limit, entity)?;
    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }
    log::debug!(
        "Showing {} of {} audit entries",
        entries.len(),
        storage.audit().entry_count()?
    );

    for entry in &entries {
        if args.json {
            println!("{}", serde_json::to_string(entry)?);
        } else {
            println!("{}", entry.format_human_readable());
        }
    }

    Ok(())
}

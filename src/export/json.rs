//! JSON export of every record with schema versioning

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Currency, FinanceSnapshot};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Every record plus enough context to interpret the amounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,

    /// Currency all stored amounts are in
    pub base_currency: Currency,

    #[serde(flatten)]
    pub records: FinanceSnapshot,

    pub metadata: ExportMetadata,
}

/// Record counts and the span of dated entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub income_count: usize,
    pub budget_count: usize,
    pub investment_count: usize,
    pub goal_count: usize,
    pub recurring_count: usize,
    pub split_count: usize,

    /// Earliest expense or income date
    pub earliest_entry: Option<NaiveDate>,

    /// Latest expense or income date
    pub latest_entry: Option<NaiveDate>,
}

impl FullExport {
    pub fn from_snapshot(snapshot: FinanceSnapshot, base_currency: Currency) -> Self {
        let dates = || {
            snapshot
                .expenses
                .iter()
                .map(|e| e.date)
                .chain(snapshot.income.iter().map(|i| i.date))
        };

        let metadata = ExportMetadata {
            expense_count: snapshot.expenses.len(),
            income_count: snapshot.income.len(),
            budget_count: snapshot.budgets.len(),
            investment_count: snapshot.investments.len(),
            goal_count: snapshot.goals.len(),
            recurring_count: snapshot.recurring.len(),
            split_count: snapshot.splits.len(),
            earliest_entry: dates().min(),
            latest_entry: dates().max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            base_currency,
            records: snapshot,
            metadata,
        }
    }
}

/// Write a full export as JSON
pub fn export_full_json<W: Write>(
    export: &FullExport,
    writer: &mut W,
    pretty: bool,
) -> FintrackResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    }
    .map_err(|e| FintrackError::Export(e.to_string()))?;

    writeln!(writer)?;
    log::debug!(
        "Exported {} records as JSON",
        export.records.record_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Goal, Income, IncomeSource, Money};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn snapshot() -> FinanceSnapshot {
        let mut snapshot = FinanceSnapshot::default();
        snapshot
            .expenses
            .push(Expense::new(Money::from_units(40), "Food", date(2, 3)));
        snapshot.income.push(Income::new(
            Money::from_units(3000),
            IncomeSource::Salary,
            date(1, 31),
        ));
        snapshot
            .goals
            .push(Goal::new("Laptop", Money::from_units(1500), date(9, 1)));
        snapshot
    }

    #[test]
    fn test_metadata() {
        let export = FullExport::from_snapshot(snapshot(), Currency::Usd);

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.expense_count, 1);
        assert_eq!(export.metadata.goal_count, 1);
        assert_eq!(export.metadata.split_count, 0);
        assert_eq!(export.metadata.earliest_entry, Some(date(1, 31)));
        assert_eq!(export.metadata.latest_entry, Some(date(2, 3)));
    }

    #[test]
    fn test_json_parses_back() {
        let original = snapshot();
        let export = FullExport::from_snapshot(original.clone(), Currency::Inr);

        let mut output = Vec::new();
        export_full_json(&export, &mut output, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.records, original);
        assert_eq!(parsed.base_currency, Currency::Inr);
    }

    #[test]
    fn test_records_are_top_level_keys() {
        let export = FullExport::from_snapshot(FinanceSnapshot::default(), Currency::Usd);
        let mut output = Vec::new();
        export_full_json(&export, &mut output, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert!(value["expenses"].is_array());
        assert!(value["splits"].is_array());
        assert_eq!(value["metadata"]["earliest_entry"], serde_json::Value::Null);
    }
}

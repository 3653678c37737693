//! YAML export for a human-readable copy of every record

use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::export::json::FullExport;

/// Write a full export as YAML behind a short comment header
pub fn export_full_yaml<W: Write>(export: &FullExport, writer: &mut W) -> FintrackResult<()> {
    writeln!(writer, "# fintrack full export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(
        writer,
        "# Amounts are in {} minor units (cents)",
        export.base_currency.code()
    )?;
    writeln!(writer)?;

    serde_yaml::to_writer(&mut *writer, export)
        .map_err(|e| FintrackError::Export(e.to_string()))?;

    log::debug!(
        "Exported {} records as YAML",
        export.records.record_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, FinanceSnapshot, Investment, InvestmentType, Money};
    use chrono::NaiveDate;

    fn export() -> FullExport {
        let mut snapshot = FinanceSnapshot::default();
        snapshot.investments.push(Investment::new(
            "Index Fund",
            InvestmentType::MutualFund,
            Money::from_units(5000),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        ));
        FullExport::from_snapshot(snapshot, Currency::Usd)
    }

    #[test]
    fn test_yaml_header_and_content() {
        let mut output = Vec::new();
        export_full_yaml(&export(), &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# fintrack full export"));
        assert!(yaml.contains("Index Fund"));
        assert!(yaml.contains("investment_count: 1"));
    }

    #[test]
    fn test_yaml_parses_back() {
        let original = export();
        let mut output = Vec::new();
        export_full_yaml(&original, &mut output).unwrap();

        // serde_yaml skips comment lines on its own
        let parsed: FullExport = serde_yaml::from_slice(&output).unwrap();
        assert_eq!(parsed.records, original.records);
    }
}

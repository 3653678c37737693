//! Splits Report
//!
//! Settlement state of shared bills and how much each person still owes.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use crate::analytics::total;
use crate::display::report::{separator, truncate};
use crate::error::FintrackResult;
use crate::export::csv::quoted_writer;
use crate::models::{
    CurrencyFormatter, FinanceSnapshot, Money, Participant, SplitId, SplitStatus,
};

/// One shared bill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitRow {
    pub id: SplitId,
    pub description: String,
    pub date: NaiveDate,
    pub total_amount: Money,
    pub settled: Money,
    pub outstanding: Money,
    pub participants: usize,
    pub status: SplitStatus,
}

/// What one person still owes across all splits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantBalance {
    pub name: String,
    pub outstanding: Money,
    /// Number of splits with an unsettled share for this person
    pub open_splits: usize,
}

/// Splits Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitsReport {
    /// Most recent first
    pub splits: Vec<SplitRow>,
    pub total_amount: Money,
    pub total_settled: Money,
    pub total_outstanding: Money,
    /// Largest balance first
    pub balances: Vec<ParticipantBalance>,
}

impl SplitsReport {
    /// Generate the report over every split in the snapshot
    pub fn generate(snapshot: &FinanceSnapshot) -> Self {
        let mut splits: Vec<SplitRow> = snapshot
            .splits
            .iter()
            .map(|split| SplitRow {
                id: split.id,
                description: split.description.clone(),
                date: split.date,
                total_amount: split.total_amount,
                settled: split.settled_amount(),
                outstanding: split.outstanding_amount(),
                participants: split.participants.len(),
                status: split.derive_status(),
            })
            .collect();
        splits.sort_by(|a, b| b.date.cmp(&a.date));

        let unsettled: Vec<&Participant> = snapshot
            .splits
            .iter()
            .flat_map(|s| s.participants.iter())
            .filter(|p| !p.settled)
            .collect();

        // Names match the way settling does: trimmed, ASCII case-insensitive.
        // The first spelling seen is the one shown.
        let mut balances: Vec<ParticipantBalance> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for participant in &unsettled {
            let name = participant.name.trim();
            let key = name.to_ascii_lowercase();
            let i = *index.entry(key).or_insert_with(|| {
                balances.push(ParticipantBalance {
                    name: name.to_string(),
                    outstanding: Money::zero(),
                    open_splits: 0,
                });
                balances.len() - 1
            });
            balances[i].outstanding += participant.amount;
            balances[i].open_splits += 1;
        }
        balances.sort_by(|a, b| b.outstanding.cmp(&a.outstanding));

        Self {
            total_amount: total(&splits, |s| s.total_amount),
            total_settled: total(&splits, |s| s.settled),
            total_outstanding: total(&splits, |s| s.outstanding),
            splits,
            balances,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, fmt: &CurrencyFormatter) -> String {
        let mut output = String::new();

        output.push_str("Split Expenses\n");
        output.push_str(&"=".repeat(78));
        output.push('\n');

        if self.splits.is_empty() {
            output.push_str("No split expenses recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:<22} {:>12} {:>12} {:>12}  {}\n",
            "Date", "Description", "Total", "Settled", "Owed", "Status"
        ));
        output.push_str(&separator(78));
        output.push('\n');

        for split in &self.splits {
            output.push_str(&format!(
                "{:<10} {:<22} {:>12} {:>12} {:>12}  {}\n",
                split.date,
                truncate(&split.description, 22),
                fmt.format(split.total_amount),
                fmt.format(split.settled),
                fmt.format(split.outstanding),
                split.status
            ));
        }

        output.push_str(&separator(78));
        output.push('\n');
        output.push_str(&format!(
            "Outstanding: {} of {}\n",
            fmt.format(self.total_outstanding),
            fmt.format(self.total_amount)
        ));

        if !self.balances.is_empty() {
            output.push_str("\nStill owed by\n");
            for balance in &self.balances {
                output.push_str(&format!(
                    "  {:<20} {:>12}  ({} open)\n",
                    balance.name,
                    fmt.format(balance.outstanding),
                    balance.open_splits
                ));
            }
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        let mut wtr = quoted_writer(writer);
        wtr.write_record([
            "Date",
            "Description",
            "Total",
            "Settled",
            "Outstanding",
            "Participants",
            "Status",
        ])?;

        for split in &self.splits {
            wtr.write_record([
                split.date.to_string(),
                split.description.clone(),
                split.total_amount.to_string(),
                split.settled.to_string(),
                split.outstanding.to_string(),
                split.participants.to_string(),
                split.status.to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SplitExpense;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn snapshot() -> FinanceSnapshot {
        let mut dinner = SplitExpense::equal(
            "Dinner",
            Money::from_units(90),
            date(5),
            &names(&["Asha", "Ben", "Chen"]),
        );
        dinner.settle("Asha");

        let cab = SplitExpense::equal(
            "Cab",
            Money::from_units(40),
            date(9),
            &names(&["Ben", "Chen"]),
        );

        let mut snapshot = FinanceSnapshot::default();
        snapshot.splits = vec![dinner, cab];
        snapshot
    }

    #[test]
    fn test_totals() {
        let report = SplitsReport::generate(&snapshot());
        assert_eq!(report.total_amount, Money::from_units(130));
        assert_eq!(report.total_settled, Money::from_units(30));
        assert_eq!(report.total_outstanding, Money::from_units(100));
    }

    #[test]
    fn test_rows_most_recent_first() {
        let report = SplitsReport::generate(&snapshot());
        assert_eq!(report.splits[0].description, "Cab");
        assert_eq!(report.splits[0].status, SplitStatus::Pending);
        assert_eq!(report.splits[1].status, SplitStatus::Partial);
    }

    #[test]
    fn test_balances_per_participant() {
        let report = SplitsReport::generate(&snapshot());
        assert_eq!(report.balances.len(), 2);

        let ben = report.balances.iter().find(|b| b.name == "Ben").unwrap();
        assert_eq!(ben.outstanding, Money::from_units(50));
        assert_eq!(ben.open_splits, 2);

        assert!(report.balances.iter().all(|b| b.name != "Asha"));
    }

    #[test]
    fn test_balances_ignore_name_case() {
        let lunch = SplitExpense::equal(
            "Lunch",
            Money::from_units(20),
            date(3),
            &names(&["Alice", "Ben"]),
        );
        let taxi = SplitExpense::equal(
            "Taxi",
            Money::from_units(30),
            date(4),
            &names(&["alice", "Ben"]),
        );

        let mut snapshot = FinanceSnapshot::default();
        snapshot.splits = vec![lunch, taxi];
        let report = SplitsReport::generate(&snapshot);

        assert_eq!(report.balances.len(), 2);
        let alice = report
            .balances
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case("alice"))
            .unwrap();
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.outstanding, Money::from_units(25));
        assert_eq!(alice.open_splits, 2);
    }

    #[test]
    fn test_fully_settled_has_no_balances() {
        let mut snapshot = snapshot();
        for split in &mut snapshot.splits {
            split.settle_all();
        }
        let report = SplitsReport::generate(&snapshot);
        assert!(report.balances.is_empty());
        assert_eq!(report.total_outstanding, Money::zero());
    }

    #[test]
    fn test_empty_report() {
        let report = SplitsReport::generate(&FinanceSnapshot::default());
        assert!(report
            .format_terminal(&CurrencyFormatter::default())
            .contains("No split expenses recorded."));
    }
}

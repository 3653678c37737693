//! CSV Export functionality
//!
//! Exports records to CSV. Every field is double-quoted and the header row
//! always comes first, even when there are no records.

use crate::error::FintrackResult;
use crate::models::{Expense, Goal, Income, Investment};
use std::io::Write;

/// CSV writer that quotes every field
pub fn quoted_writer<W: Write>(writer: W) -> ::csv::Writer<W> {
    ::csv::WriterBuilder::new()
        .quote_style(::csv::QuoteStyle::Always)
        .from_writer(writer)
}

/// Export expenses to CSV
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: &mut W) -> FintrackResult<()> {
    let mut wtr = quoted_writer(writer);
    wtr.write_record([
        "ID",
        "Date",
        "Category",
        "Description",
        "Payment Method",
        "Amount",
    ])?;

    for expense in expenses {
        wtr.write_record([
            expense.id.as_uuid().to_string(),
            expense.date.to_string(),
            expense.category.clone(),
            expense.description.clone(),
            expense.payment_method.as_str().to_string(),
            expense.amount.to_string(),
        ])?;
    }

    wtr.flush()?;
    log::debug!("Exported {} expenses to CSV", expenses.len());
    Ok(())
}

/// Export income entries to CSV
pub fn export_income_csv<W: Write>(income: &[Income], writer: &mut W) -> FintrackResult<()> {
    let mut wtr = quoted_writer(writer);
    wtr.write_record(["ID", "Date", "Source", "Category", "Description", "Amount"])?;

    for entry in income {
        wtr.write_record([
            entry.id.as_uuid().to_string(),
            entry.date.to_string(),
            entry.source.label().to_string(),
            entry.category.clone().unwrap_or_default(),
            entry.description.clone(),
            entry.amount.to_string(),
        ])?;
    }

    wtr.flush()?;
    log::debug!("Exported {} income entries to CSV", income.len());
    Ok(())
}

/// Export investments to CSV
pub fn export_investments_csv<W: Write>(
    investments: &[Investment],
    writer: &mut W,
) -> FintrackResult<()> {
    let mut wtr = quoted_writer(writer);
    wtr.write_record([
        "ID",
        "Name",
        "Type",
        "Purchase Date",
        "Quantity",
        "Unit Price",
        "Initial Amount",
        "Current Value",
    ])?;

    for inv in investments {
        wtr.write_record([
            inv.id.as_uuid().to_string(),
            inv.name.clone(),
            inv.investment_type.label().to_string(),
            inv.purchase_date.to_string(),
            inv.quantity.to_string(),
            inv.unit_price.to_string(),
            inv.initial_amount.to_string(),
            inv.current_value.to_string(),
        ])?;
    }

    wtr.flush()?;
    log::debug!("Exported {} investments to CSV", investments.len());
    Ok(())
}

/// Export goals to CSV
pub fn export_goals_csv<W: Write>(goals: &[Goal], writer: &mut W) -> FintrackResult<()> {
    let mut wtr = quoted_writer(writer);
    wtr.write_record([
        "ID",
        "Name",
        "Category",
        "Priority",
        "Target Date",
        "Target Amount",
        "Current Amount",
    ])?;

    for goal in goals {
        wtr.write_record([
            goal.id.as_uuid().to_string(),
            goal.name.clone(),
            goal.category.clone(),
            goal.priority.to_string(),
            goal.target_date.to_string(),
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
        ])?;
    }

    wtr.flush()?;
    log::debug!("Exported {} goals to CSV", goals.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncomeSource, Money, PaymentMethod};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_expense_csv_quotes_every_field() {
        let expense = Expense::new(Money::from_cents(1250), "Food", date())
            .with_description("Lunch, with \"friends\"")
            .with_payment_method(PaymentMethod::Card);

        let mut output = Vec::new();
        export_expenses_csv(&[expense], &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "\"ID\",\"Date\",\"Category\",\"Description\",\"Payment Method\",\"Amount\""
        );
        assert!(lines[1].contains("\"2025-03-14\",\"Food\",\"Lunch, with \"\"friends\"\"\",\"card\",\"12.50\""));
    }

    #[test]
    fn test_header_written_for_empty_input() {
        let mut output = Vec::new();
        export_income_csv(&[], &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("\"ID\""));
    }

    #[test]
    fn test_income_csv_blank_category() {
        let income = Income::new(Money::from_units(3000), IncomeSource::Salary, date());
        let mut output = Vec::new();
        export_income_csv(&[income], &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        assert!(csv.contains("\"Salary\",\"\",\"\",\"3000.00\""));
    }
}

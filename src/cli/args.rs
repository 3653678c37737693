//! Parsing of user-typed amounts, dates and months
//!
//! Malformed input is rejected here, before anything reaches storage.

use chrono::{Duration, Local, NaiveDate};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Month};

/// Parse a non-negative amount such as "12", "12.50" or "$1,200"
pub fn parse_amount(input: &str) -> FintrackResult<Money> {
    let amount = Money::parse(input)
        .map_err(|e| FintrackError::Validation(format!("Invalid amount: {}", e)))?;
    if amount.is_negative() {
        return Err(FintrackError::Validation(format!(
            "Amount cannot be negative: {}",
            input
        )));
    }
    Ok(amount)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date: "today", "yesterday", ISO `YYYY-MM-DD`, or the configured format
pub fn parse_date(input: &str, date_format: &str) -> FintrackResult<NaiveDate> {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "today" => return Ok(today()),
        "yesterday" => return Ok(today() - Duration::days(1)),
        _ => {}
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, date_format))
        .map_err(|_| {
            FintrackError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or {}",
                input, date_format
            ))
        })
}

/// [`parse_date`], defaulting to today
pub fn parse_date_or_today(input: Option<&str>, date_format: &str) -> FintrackResult<NaiveDate> {
    match input {
        Some(s) => parse_date(s, date_format),
        None => Ok(today()),
    }
}

/// Parse a month: `YYYY-MM`, "current"/"this", "last"/"previous" or "next"
pub fn parse_month(input: &str) -> FintrackResult<Month> {
    let current = Month::of(today());
    match input.trim().to_lowercase().as_str() {
        "current" | "this" | "now" => Ok(current),
        "last" | "previous" | "prev" => Ok(current.prev()),
        "next" => Ok(current.next()),
        _ => Month::parse(input)
            .map_err(|e| FintrackError::Validation(format!("Invalid month: {}", e))),
    }
}

/// [`parse_month`], defaulting to the current month
pub fn parse_month_or_current(input: Option<&str>) -> FintrackResult<Month> {
    match input {
        Some(s) => parse_month(s),
        None => Ok(Month::of(today())),
    }
}

/// Split `name=amount` into its parts; a bare name has no amount
pub fn parse_named_amount(input: &str) -> FintrackResult<(String, Option<Money>)> {
    match input.split_once('=') {
        Some((name, amount)) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(FintrackError::Validation(format!(
                    "Missing name in '{}'",
                    input
                )));
            }
            Ok((name.to_string(), Some(parse_amount(amount)?)))
        }
        None => Ok((input.trim().to_string(), None)),
    }
}

/// Buffered writer for `path`, or stdout when no path is given
pub fn output_writer(path: Option<&Path>) -> FintrackResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FintrackError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            log::info!("Writing output to {}", path.display());
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

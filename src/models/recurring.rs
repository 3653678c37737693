//! Recurring transaction model
//!
//! Recurring items describe a schedule. They are never turned into actual
//! expense or income records; reports only project them.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::RecurringId;
use super::money::Money;
use super::validation::{non_empty, non_negative, UnknownVariant, ValidationError};

/// Whether a recurring item spends or earns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurringKind {
    #[default]
    Expense,
    Income,
}

impl fmt::Display for RecurringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

impl FromStr for RecurringKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(UnknownVariant {
                kind: "recurring type",
                value: s.to_string(),
                expected: &["expense", "income"],
            }),
        }
    }
}

/// How often a recurring item repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Frequency {
    /// Occurrences per month, on average, used to normalize amounts
    pub fn per_month(&self) -> f64 {
        match self {
            Self::Daily => 365.0 / 12.0,
            Self::Weekly => 52.0 / 12.0,
            Self::Monthly => 1.0,
            Self::Yearly => 1.0 / 12.0,
        }
    }

    /// The `n`th occurrence of a schedule starting at `start`
    ///
    /// Monthly and yearly schedules clamp to the last day of shorter months
    /// (a series starting Jan 31 falls on Feb 28, then Mar 31).
    pub fn nth_occurrence(&self, start: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Self::Daily => start.checked_add_signed(Duration::days(n as i64)),
            Self::Weekly => start.checked_add_signed(Duration::weeks(n as i64)),
            Self::Monthly => start.checked_add_months(Months::new(n)),
            Self::Yearly => start.checked_add_months(Months::new(n.checked_mul(12)?)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annual" | "annually" => Ok(Self::Yearly),
            _ => Err(UnknownVariant {
                kind: "frequency",
                value: s.to_string(),
                expected: &["daily", "weekly", "monthly", "yearly"],
            }),
        }
    }
}

/// A scheduled, repeating expense or income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    /// Unique identifier
    pub id: RecurringId,

    /// Display name (e.g., "Rent", "Netflix")
    pub name: String,

    /// Amount per occurrence
    pub amount: Money,

    /// Expense or income
    #[serde(rename = "type")]
    pub kind: RecurringKind,

    /// Repeat interval
    pub frequency: Frequency,

    /// First occurrence
    pub start_date: NaiveDate,

    /// Last day an occurrence may fall on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Free-form category
    #[serde(default)]
    pub category: String,

    /// Paused items are kept but excluded from projections
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// When the item was created
    pub created_at: DateTime<Utc>,

    /// When the item was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl RecurringTransaction {
    /// Create an active recurring item with no end date
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        kind: RecurringKind,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecurringId::new(),
            name: name.into(),
            amount,
            kind,
            frequency,
            start_date,
            end_date: None,
            category: String::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Pause or resume the item
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }

    /// Whether the schedule has ended before `date`
    pub fn has_ended(&self, date: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end < date)
    }

    /// First occurrence on or after `date`, if the schedule is still running
    pub fn next_occurrence(&self, date: NaiveDate) -> Option<NaiveDate> {
        if !self.is_active {
            return None;
        }
        if date <= self.start_date {
            return Some(self.start_date).filter(|d| !self.has_ended(*d));
        }

        // Jump close to `date` instead of stepping from the start
        let elapsed_days = (date - self.start_date).num_days();
        let estimate = match self.frequency {
            Frequency::Daily => elapsed_days,
            Frequency::Weekly => elapsed_days / 7,
            Frequency::Monthly => {
                (date.year() as i64 - self.start_date.year() as i64) * 12
                    + (date.month() as i64 - self.start_date.month() as i64)
                    - 1
            }
            Frequency::Yearly => date.year() as i64 - self.start_date.year() as i64 - 1,
        };
        let mut n = u32::try_from(estimate.max(0)).ok()?;

        loop {
            let occurrence = self.frequency.nth_occurrence(self.start_date, n)?;
            if occurrence >= date {
                return Some(occurrence).filter(|d| !self.has_ended(*d));
            }
            n = n.checked_add(1)?;
        }
    }

    /// Validate the item
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_empty("Recurring name", &self.name)?;
        non_negative("Recurring amount", self.amount)?;
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::EndBeforeStart);
            }
        }
        Ok(())
    }
}

impl fmt::Display for RecurringTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.kind, self.amount, self.frequency
        )?;
        if !self.is_active {
            write!(f, " (paused)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rent() -> RecurringTransaction {
        RecurringTransaction::new(
            "Rent",
            Money::from_units(1200),
            RecurringKind::Expense,
            Frequency::Monthly,
            date(2025, 1, 31),
        )
    }

    #[test]
    fn test_next_occurrence_before_start() {
        assert_eq!(rent().next_occurrence(date(2024, 12, 1)), Some(date(2025, 1, 31)));
    }

    #[test]
    fn test_next_occurrence_monthly_clamps() {
        let r = rent();
        assert_eq!(r.next_occurrence(date(2025, 2, 1)), Some(date(2025, 2, 28)));
        assert_eq!(r.next_occurrence(date(2025, 3, 1)), Some(date(2025, 3, 31)));
        assert_eq!(r.next_occurrence(date(2025, 3, 31)), Some(date(2025, 3, 31)));
    }

    #[test]
    fn test_next_occurrence_weekly_and_yearly() {
        let gym = RecurringTransaction::new(
            "Gym",
            Money::from_units(10),
            RecurringKind::Expense,
            Frequency::Weekly,
            date(2025, 1, 6),
        );
        assert_eq!(gym.next_occurrence(date(2025, 1, 7)), Some(date(2025, 1, 13)));
        assert_eq!(gym.next_occurrence(date(2025, 1, 13)), Some(date(2025, 1, 13)));

        let insurance = RecurringTransaction::new(
            "Insurance",
            Money::from_units(600),
            RecurringKind::Expense,
            Frequency::Yearly,
            date(2023, 5, 10),
        );
        assert_eq!(insurance.next_occurrence(date(2025, 1, 1)), Some(date(2025, 5, 10)));
        assert_eq!(insurance.next_occurrence(date(2025, 6, 1)), Some(date(2026, 5, 10)));
    }

    #[test]
    fn test_next_occurrence_respects_end_and_pause() {
        let mut r = rent().with_end_date(date(2025, 3, 15));
        assert_eq!(r.next_occurrence(date(2025, 2, 1)), Some(date(2025, 2, 28)));
        assert_eq!(r.next_occurrence(date(2025, 3, 1)), None);

        r.set_active(false);
        assert_eq!(r.next_occurrence(date(2025, 2, 1)), None);
    }

    #[test]
    fn test_validation() {
        let r = rent().with_end_date(date(2024, 1, 1));
        assert_eq!(r.validate(), Err(ValidationError::EndBeforeStart));
        assert!(rent().validate().is_ok());
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("Annual".parse::<Frequency>().unwrap(), Frequency::Yearly);
        assert!("hourly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_defaults_to_active_when_missing() {
        let mut value = serde_json::to_value(rent()).unwrap();
        value.as_object_mut().unwrap().remove("is_active");
        let back: RecurringTransaction = serde_json::from_value(value).unwrap();
        assert!(back.is_active);
    }
}

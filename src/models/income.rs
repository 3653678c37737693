//! Income model
//!
//! A single inflow of money with a source and an optional category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::IncomeId;
use super::money::Money;
use super::validation::{non_negative, UnknownVariant, ValidationError};

/// Where income came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncomeSource {
    #[default]
    Salary,
    Freelance,
    Investment,
    Gift,
    Bonus,
    Other,
}

impl IncomeSource {
    pub const ALL: [IncomeSource; 6] = [
        Self::Salary,
        Self::Freelance,
        Self::Investment,
        Self::Gift,
        Self::Bonus,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Freelance => "freelance",
            Self::Investment => "investment",
            Self::Gift => "gift",
            Self::Bonus => "bonus",
            Self::Other => "other",
        }
    }

    /// Human-readable label, also used as the grouping key in breakdowns
    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
            Self::Gift => "Gift",
            Self::Bonus => "Bonus",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IncomeSource {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|src| src.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "income source",
                value: s.to_string(),
                expected: &["salary", "freelance", "investment", "gift", "bonus", "other"],
            })
    }
}

/// A recorded income entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    /// Unique identifier
    pub id: IncomeId,

    /// Amount received (never negative)
    pub amount: Money,

    /// Source of the income
    pub source: IncomeSource,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Date received
    pub date: NaiveDate,

    /// Optional finer-grained category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// When the entry was recorded
    pub created_at: DateTime<Utc>,

    /// When the entry was last modified
    pub updated_at: DateTime<Utc>,
}

impl Income {
    /// Create a new income entry
    pub fn new(amount: Money, source: IncomeSource, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::new(),
            amount,
            source,
            description: String::new(),
            date,
            category: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validate the income entry
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_negative("Income amount", self.amount)
    }
}

impl fmt::Display for Income {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.source, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_income() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let income = Income::new(Money::from_units(5000), IncomeSource::Salary, date)
            .with_description("January pay")
            .with_category("Primary job");

        assert!(income.validate().is_ok());
        assert_eq!(income.category.as_deref(), Some("Primary job"));
        assert_eq!(income.to_string(), "2025-01-01 Salary 5000.00");
    }

    #[test]
    fn test_negative_income_rejected() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let income = Income::new(Money::from_cents(-10), IncomeSource::Gift, date);
        assert!(income.validate().is_err());
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            "Freelance".parse::<IncomeSource>().unwrap(),
            IncomeSource::Freelance
        );
        assert!("lottery".parse::<IncomeSource>().is_err());
    }

    #[test]
    fn test_category_omitted_when_absent() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let income = Income::new(Money::from_units(10), IncomeSource::Bonus, date);
        let json = serde_json::to_string(&income).unwrap();
        assert!(!json.contains("category"));
        assert!(json.contains("\"source\":\"bonus\""));
    }
}

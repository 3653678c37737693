//! Expense model
//!
//! A single outflow of money, tagged with a free-form category and the
//! payment method used.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::ExpenseId;
use super::money::Money;
use super::validation::{non_empty, non_negative, UnknownVariant, ValidationError};

/// How an expense was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
    Bank,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        Self::Cash,
        Self::Card,
        Self::Upi,
        Self::Bank,
        Self::Wallet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Upi => "upi",
            Self::Bank => "bank",
            Self::Wallet => "wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Card => write!(f, "Card"),
            Self::Upi => write!(f, "UPI"),
            Self::Bank => write!(f, "Bank Transfer"),
            Self::Wallet => write!(f, "Wallet"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "payment method",
                value: s.to_string(),
                expected: &["cash", "card", "upi", "bank", "wallet"],
            })
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent (never negative)
    pub amount: Money,

    /// Category name, taken verbatim
    pub category: String,

    /// What the money was spent on
    #[serde(default)]
    pub description: String,

    /// Date of the expense
    pub date: NaiveDate,

    /// How it was paid
    #[serde(default)]
    pub payment_method: PaymentMethod,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense paid in cash
    pub fn new(amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            amount,
            category: category.into(),
            description: String::new(),
            date,
            payment_method: PaymentMethod::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style payment method setter
    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_negative("Expense amount", self.amount)?;
        non_empty("Expense category", &self.category)?;
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)?;
        if !self.description.is_empty() {
            write!(f, " ({})", self.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new(Money::from_units(300), "Food", jan(5))
            .with_description("Groceries")
            .with_payment_method(PaymentMethod::Upi);

        assert_eq!(expense.amount.cents(), 30000);
        assert_eq!(expense.payment_method, PaymentMethod::Upi);
        assert!(expense.validate().is_ok());
        assert_eq!(expense.to_string(), "2025-01-05 Food 300.00 (Groceries)");
    }

    #[test]
    fn test_validation() {
        let negative = Expense::new(Money::from_cents(-1), "Food", jan(1));
        assert!(matches!(
            negative.validate(),
            Err(ValidationError::NegativeAmount { .. })
        ));

        let blank = Expense::new(Money::from_units(1), "  ", jan(1));
        assert_eq!(
            blank.validate(),
            Err(ValidationError::EmptyField("Expense category"))
        );

        let huge = Expense::new(Money::from_cents(Money::MAX.cents() + 1), "Food", jan(1));
        assert!(matches!(
            huge.validate(),
            Err(ValidationError::AmountTooLarge { .. })
        ));
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("UPI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!(" card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_serialization() {
        let expense = Expense::new(Money::from_units(20), "Transport", jan(2))
            .with_payment_method(PaymentMethod::Wallet);
        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"payment_method\":\"wallet\""));
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
    }
}

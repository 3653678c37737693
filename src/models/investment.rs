//! Investment model
//!
//! Holdings with a user-entered current value. Nothing here fetches live
//! prices; gains are computed from whatever value the user last recorded.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::InvestmentId;
use super::money::Money;
use super::validation::{non_empty, non_negative, UnknownVariant, ValidationError};

/// Asset class of an investment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    #[default]
    Stocks,
    Bonds,
    MutualFund,
    Crypto,
    RealEstate,
    FixedDeposit,
    Other,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 7] = [
        Self::Stocks,
        Self::Bonds,
        Self::MutualFund,
        Self::Crypto,
        Self::RealEstate,
        Self::FixedDeposit,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::Bonds => "bonds",
            Self::MutualFund => "mutual_fund",
            Self::Crypto => "crypto",
            Self::RealEstate => "real_estate",
            Self::FixedDeposit => "fixed_deposit",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Stocks => "Stocks",
            Self::Bonds => "Bonds",
            Self::MutualFund => "Mutual Fund",
            Self::Crypto => "Crypto",
            Self::RealEstate => "Real Estate",
            Self::FixedDeposit => "Fixed Deposit",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InvestmentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| UnknownVariant {
                kind: "investment type",
                value: s.to_string(),
                expected: &[
                    "stocks",
                    "bonds",
                    "mutual_fund",
                    "crypto",
                    "real_estate",
                    "fixed_deposit",
                    "other",
                ],
            })
    }
}

/// A single holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Unique identifier
    pub id: InvestmentId,

    /// Display name (ticker, fund name, property...)
    pub name: String,

    /// Asset class
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,

    /// Amount originally invested
    pub initial_amount: Money,

    /// Value as last entered by the user
    pub current_value: Money,

    /// Date of purchase
    pub purchase_date: NaiveDate,

    /// Units held
    #[serde(default)]
    pub quantity: f64,

    /// Price per unit at purchase
    #[serde(default)]
    pub unit_price: Money,

    /// When the holding was recorded
    pub created_at: DateTime<Utc>,

    /// When the holding was last modified
    pub updated_at: DateTime<Utc>,
}

impl Investment {
    /// Create a holding valued at its purchase cost
    pub fn new(
        name: impl Into<String>,
        investment_type: InvestmentType,
        initial_amount: Money,
        purchase_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: InvestmentId::new(),
            name: name.into(),
            investment_type,
            initial_amount,
            current_value: initial_amount,
            purchase_date,
            quantity: 0.0,
            unit_price: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style units setter; derives the initial amount from them
    pub fn with_units(mut self, quantity: f64, unit_price: Money) -> Self {
        self.quantity = quantity;
        self.unit_price = unit_price;
        self.initial_amount = unit_price.scale(quantity);
        self.current_value = self.initial_amount;
        self
    }

    /// Record a new current value
    pub fn revalue(&mut self, current_value: Money) {
        self.current_value = current_value;
        self.updated_at = Utc::now();
    }

    /// Validate the holding
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_empty("Investment name", &self.name)?;
        non_negative("Initial amount", self.initial_amount)?;
        non_negative("Current value", self.current_value)?;
        non_negative("Unit price", self.unit_price)?;
        if self.quantity < 0.0 || !self.quantity.is_finite() {
            return Err(ValidationError::InvalidQuantity);
        }
        Ok(())
    }
}

impl fmt::Display for Investment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} -> {}",
            self.name, self.investment_type, self.initial_amount, self.current_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_new_investment_starts_at_cost() {
        let inv = Investment::new(
            "Index Fund",
            InvestmentType::MutualFund,
            Money::from_units(1000),
            purchase(),
        );
        assert_eq!(inv.current_value, inv.initial_amount);
        assert!(inv.validate().is_ok());
    }

    #[test]
    fn test_with_units() {
        let inv = Investment::new("ACME", InvestmentType::Stocks, Money::zero(), purchase())
            .with_units(10.0, Money::from_units(25));
        assert_eq!(inv.initial_amount, Money::from_units(250));
        assert_eq!(inv.current_value, Money::from_units(250));
    }

    #[test]
    fn test_revalue() {
        let mut inv = Investment::new("BTC", InvestmentType::Crypto, Money::from_units(1000), purchase());
        inv.revalue(Money::from_units(1200));
        assert_eq!(inv.current_value, Money::from_units(1200));
    }

    #[test]
    fn test_type_parse() {
        assert_eq!(
            "Mutual Fund".parse::<InvestmentType>().unwrap(),
            InvestmentType::MutualFund
        );
        assert_eq!(
            "real-estate".parse::<InvestmentType>().unwrap(),
            InvestmentType::RealEstate
        );
        assert!("beanie babies".parse::<InvestmentType>().is_err());
    }

    #[test]
    fn test_type_serializes_as_type_field() {
        let inv = Investment::new("FD", InvestmentType::FixedDeposit, Money::from_units(1), purchase());
        let json = serde_json::to_string(&inv).unwrap();
        assert!(json.contains("\"type\":\"fixed_deposit\""));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut inv = Investment::new("X", InvestmentType::Other, Money::zero(), purchase());
        inv.quantity = -1.0;
        assert_eq!(inv.validate(), Err(ValidationError::InvalidQuantity));
    }
}

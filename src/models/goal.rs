//! Savings goal model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::GoalId;
use super::money::Money;
use super::validation::{non_empty, non_negative, UnknownVariant, ValidationError};

/// How urgent a goal is
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

impl FromStr for GoalPriority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(UnknownVariant {
                kind: "priority",
                value: s.to_string(),
                expected: &["low", "medium", "high"],
            }),
        }
    }
}

/// A savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal name
    pub name: String,

    /// Amount to reach
    pub target_amount: Money,

    /// Amount saved so far
    #[serde(default)]
    pub current_amount: Money,

    /// Date the goal should be reached by
    pub target_date: NaiveDate,

    /// Free-form category
    #[serde(default)]
    pub category: String,

    /// Priority
    #[serde(default)]
    pub priority: GoalPriority,

    /// When the goal was created
    pub created_at: DateTime<Utc>,

    /// When the goal was last modified
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a goal with nothing saved yet
    pub fn new(name: impl Into<String>, target_amount: Money, target_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            target_date,
            category: String::new(),
            priority: GoalPriority::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_priority(mut self, priority: GoalPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Add (or, with a negative amount, withdraw) savings
    ///
    /// The saved amount never drops below zero.
    pub fn contribute(&mut self, amount: Money) {
        self.current_amount = (self.current_amount + amount).non_negative();
        self.updated_at = Utc::now();
    }

    /// Amount still missing; zero once the target is reached
    pub fn remaining(&self) -> Money {
        (self.target_amount - self.current_amount).non_negative()
    }

    /// Whether the saved amount has reached the target
    pub fn is_complete(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_empty("Goal name", &self.name)?;
        non_negative("Target amount", self.target_amount)?;
        non_negative("Saved amount", self.current_amount)?;
        if self.target_amount.is_zero() {
            return Err(ValidationError::ZeroTarget("Target amount"));
        }
        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} / {} by {}",
            self.name, self.current_amount, self.target_amount, self.target_date
        )
    }
}

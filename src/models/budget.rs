//! Monthly budget model
//!
//! One budget per calendar month: a total limit plus optional per-category
//! limits. Category limits are not required to add up to the total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::month::Month;
use super::validation::{non_empty, non_negative, ValidationError};

/// A spending budget for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The month this budget applies to
    pub month: Month,

    /// Overall spending limit for the month
    pub total_budget: Money,

    /// Per-category limits; `None` marks a tracked category without a limit
    #[serde(default)]
    pub categories: BTreeMap<String, Option<Money>>,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a budget with no category limits
    pub fn new(month: Month, total_budget: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            month,
            total_budget,
            categories: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the overall limit
    pub fn set_total(&mut self, amount: Money) {
        self.total_budget = amount;
        self.updated_at = Utc::now();
    }

    /// Set or clear a category limit
    pub fn set_category(&mut self, category: impl Into<String>, limit: Option<Money>) {
        self.categories.insert(category.into(), limit);
        self.updated_at = Utc::now();
    }

    /// Stop tracking a category; returns whether it was present
    pub fn remove_category(&mut self, category: &str) -> bool {
        let removed = self.categories.remove(category).is_some();
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Limit for a category, if one is set
    pub fn category_limit(&self, category: &str) -> Option<Money> {
        self.categories.get(category).copied().flatten()
    }

    /// Sum of the category limits that are set
    pub fn allocated(&self) -> Money {
        self.categories.values().flatten().sum()
    }

    /// Portion of the total not assigned to any category limit
    pub fn unallocated(&self) -> Money {
        self.total_budget - self.allocated()
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_negative("Total budget", self.total_budget)?;
        for (category, limit) in &self.categories {
            non_empty("Budget category", category)?;
            if let Some(limit) = limit {
                non_negative("Category budget", *limit)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} budget: {} ({} categories)",
            self.month,
            self.total_budget,
            self.categories.len()
        )
    }
}

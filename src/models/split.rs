//! Split expense model
//!
//! Bookkeeping for a shared bill: who owes what and who has settled.
//! There is no double-entry ledger behind this; the status is derived from
//! the participants' settlement flags.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ids::SplitId;
use super::money::Money;
use super::validation::{non_empty, non_negative, ValidationError};

/// Settlement state of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitStatus {
    /// Nobody has settled
    #[default]
    Pending,
    /// Some participants have settled
    Partial,
    /// Everyone has settled
    Settled,
}

impl fmt::Display for SplitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Partial => write!(f, "Partial"),
            Self::Settled => write!(f, "Settled"),
        }
    }
}

/// One person's share of a split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub amount: Money,
    #[serde(default)]
    pub settled: bool,
}

impl Participant {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            amount,
            settled: false,
        }
    }
}

/// A bill shared between several people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitExpense {
    /// Unique identifier
    pub id: SplitId,

    /// What the bill was for
    pub description: String,

    /// Full amount of the bill
    pub total_amount: Money,

    /// Date of the bill
    pub date: NaiveDate,

    /// Shares owed by each participant
    pub participants: Vec<Participant>,

    /// Derived from the participants; refreshed on every change
    #[serde(default)]
    pub status: SplitStatus,

    /// When the split was created
    pub created_at: DateTime<Utc>,

    /// When the split was last modified
    pub updated_at: DateTime<Utc>,
}

impl SplitExpense {
    /// Create a split with explicit shares
    pub fn new(
        description: impl Into<String>,
        total_amount: Money,
        date: NaiveDate,
        participants: Vec<Participant>,
    ) -> Self {
        let now = Utc::now();
        let mut split = Self {
            id: SplitId::new(),
            description: description.into(),
            total_amount,
            date,
            participants,
            status: SplitStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        split.status = split.derive_status();
        split
    }

    /// Create a split dividing the total evenly between `names`
    ///
    /// Leftover cents go to the first participants so the shares always add
    /// up to the total.
    pub fn equal(
        description: impl Into<String>,
        total_amount: Money,
        date: NaiveDate,
        names: &[String],
    ) -> Self {
        let count = names.len() as i64;
        let participants = if count == 0 {
            Vec::new()
        } else {
            let base = total_amount.cents() / count;
            let remainder = total_amount.cents() % count;
            names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let extra = if (i as i64) < remainder { 1 } else { 0 };
                    Participant::new(name.clone(), Money::from_cents(base + extra))
                })
                .collect()
        };
        Self::new(description, total_amount, date, participants)
    }

    /// Status implied by the participants' flags
    pub fn derive_status(&self) -> SplitStatus {
        let settled = self.participants.iter().filter(|p| p.settled).count();
        if !self.participants.is_empty() && settled == self.participants.len() {
            SplitStatus::Settled
        } else if settled > 0 {
            SplitStatus::Partial
        } else {
            SplitStatus::Pending
        }
    }

    /// Mark a participant as settled (case-insensitive name match)
    ///
    /// Returns false when no participant has that name.
    pub fn settle(&mut self, name: &str) -> bool {
        let found = self
            .participants
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()));

        match found {
            Some(participant) => {
                participant.settled = true;
                self.status = self.derive_status();
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Mark everyone as settled
    pub fn settle_all(&mut self) {
        for participant in &mut self.participants {
            participant.settled = true;
        }
        self.status = self.derive_status();
        self.updated_at = Utc::now();
    }

    /// Sum of all shares
    pub fn shares_total(&self) -> Money {
        self.participants.iter().map(|p| p.amount).sum()
    }

    /// Sum of settled shares
    pub fn settled_amount(&self) -> Money {
        self.participants
            .iter()
            .filter(|p| p.settled)
            .map(|p| p.amount)
            .sum()
    }

    /// Sum of shares not yet settled
    pub fn outstanding_amount(&self) -> Money {
        self.participants
            .iter()
            .filter(|p| !p.settled)
            .map(|p| p.amount)
            .sum()
    }

    /// Validate the split
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_empty("Split description", &self.description)?;
        non_negative("Split total", self.total_amount)?;
        if self.participants.is_empty() {
            return Err(ValidationError::NoParticipants);
        }

        let mut seen = HashSet::new();
        for participant in &self.participants {
            non_empty("Participant name", &participant.name)?;
            non_negative("Participant share", participant.amount)?;
            if !seen.insert(participant.name.trim().to_lowercase()) {
                return Err(ValidationError::DuplicateParticipant(
                    participant.name.clone(),
                ));
            }
        }

        let shares = self.shares_total();
        if shares > self.total_amount {
            return Err(ValidationError::SharesExceedTotal {
                shares,
                total: self.total_amount,
            });
        }
        Ok(())
    }
}

impl fmt::Display for SplitExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} split {} ways [{}]",
            self.description,
            self.total_amount,
            self.participants.len(),
            self.status
        )
    }
}

//! Validation errors shared by all record types
//!
//! Records are validated once, at the boundary where they enter the system
//! (CLI input and repository upserts). Analytics code assumes valid input.

use thiserror::Error;

use super::money::Money;

/// Reasons a record can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A monetary field is negative
    #[error("{field} cannot be negative (got {amount})")]
    NegativeAmount { field: &'static str, amount: Money },
    /// A monetary field is larger than any single record may hold
    #[error("{field} is too large (got {amount}, limit {})", Money::MAX)]
    AmountTooLarge { field: &'static str, amount: Money },
    /// A required text field is blank
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    /// A target that must be positive is zero
    #[error("{0} must be greater than zero")]
    ZeroTarget(&'static str),
    /// A date range ends before it starts
    #[error("End date cannot be before start date")]
    EndBeforeStart,
    /// Split participant shares add up to more than the bill
    #[error("Participant shares ({shares}) exceed the split total ({total})")]
    SharesExceedTotal { shares: Money, total: Money },
    /// A split must name at least one participant
    #[error("A split needs at least one participant")]
    NoParticipants,
    /// The same participant appears twice in one split
    #[error("Participant '{0}' is listed more than once")]
    DuplicateParticipant(String),
    /// A unit count is negative or not a finite number
    #[error("Quantity must be a non-negative number")]
    InvalidQuantity,
}

impl From<ValidationError> for crate::error::FintrackError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Reject negative amounts and amounts above [`Money::MAX`]
pub(crate) fn non_negative(field: &'static str, amount: Money) -> Result<(), ValidationError> {
    if amount.is_negative() {
        Err(ValidationError::NegativeAmount { field, amount })
    } else if !amount.in_range() {
        Err(ValidationError::AmountTooLarge { field, amount })
    } else {
        Ok(())
    }
}

/// Reject blank strings
pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

/// Error returned when a string does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{value}' (expected one of: {})", .expected.join(", "))]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

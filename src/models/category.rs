//! Spending categories
//!
//! Categories are free-form strings on each record. This module only
//! provides the default list offered to users and the fallback label used
//! when a record carries no category.

/// Label assigned to records without a category or source
pub const FALLBACK_CATEGORY: &str = "Other";

/// Categories offered by default when recording expenses
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Healthcare",
    "Education",
    "Travel",
    "Housing",
    FALLBACK_CATEGORY,
];

/// Check whether a category is one of the defaults (case-insensitive)
///
/// Used only for hints; records with other categories are accepted as-is.
pub fn is_default_expense_category(name: &str) -> bool {
    DEFAULT_EXPENSE_CATEGORIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_a_default() {
        assert!(DEFAULT_EXPENSE_CATEGORIES.contains(&FALLBACK_CATEGORY));
    }

    #[test]
    fn test_is_default_category() {
        assert!(is_default_expense_category("food"));
        assert!(is_default_expense_category(" Bills "));
        assert!(!is_default_expense_category("Crypto losses"));
    }
}

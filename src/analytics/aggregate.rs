//! Sums, grouped breakdowns and month buckets over record slices
//!
//! Every function takes the records plus selector closures and returns a
//! freshly built value. Empty input yields zero or an empty result.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Money, Month, FALLBACK_CATEGORY};

/// Number of months shown in trend series unless configured otherwise
pub const DEFAULT_TREND_WINDOW: usize = 6;

/// Sum of `amount(record)` across all records
pub fn total<T, A>(records: &[T], amount: A) -> Money
where
    A: Fn(&T) -> Money,
{
    records.iter().map(amount).sum()
}

/// One key of a grouped breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupEntry {
    pub key: String,
    pub amount: Money,
}

/// Per-key totals, kept in the order keys were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupTotals {
    entries: Vec<GroupEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl GroupTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `key`, creating the key on first sight
    pub fn add(&mut self, key: &str, amount: Money) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].amount += amount,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push(GroupEntry {
                    key: key.to_string(),
                    amount,
                });
            }
        }
    }

    /// Total for a key, if it appeared
    pub fn get(&self, key: &str) -> Option<Money> {
        self.index.get(key).map(|&i| self.entries[i].amount)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &GroupEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all keys
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Entries by descending amount; equal amounts keep first-seen order
    pub fn sorted_desc(&self) -> Vec<&GroupEntry> {
        let mut sorted: Vec<&GroupEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
        sorted
    }
}

impl<'a> IntoIterator for &'a GroupTotals {
    type Item = &'a GroupEntry;
    type IntoIter = std::slice::Iter<'a, GroupEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Sum amounts per key, labelling missing or blank keys "Other"
pub fn group_totals<'a, T, K, A>(records: &'a [T], key: K, amount: A) -> GroupTotals
where
    K: Fn(&'a T) -> Option<&'a str>,
    A: Fn(&T) -> Money,
{
    group_totals_with_fallback(records, key, amount, FALLBACK_CATEGORY)
}

/// Sum amounts per key with a custom label for missing or blank keys
///
/// Keys are used verbatim: "Food" and "food" are different groups.
pub fn group_totals_with_fallback<'a, T, K, A>(
    records: &'a [T],
    key: K,
    amount: A,
    fallback: &str,
) -> GroupTotals
where
    K: Fn(&'a T) -> Option<&'a str>,
    A: Fn(&T) -> Money,
{
    let mut groups = GroupTotals::new();
    for record in records {
        match key(record).filter(|k| !k.trim().is_empty()) {
            Some(label) => groups.add(label, amount(record)),
            None => groups.add(fallback, amount(record)),
        }
    }
    groups
}

/// The key with the largest total
///
/// Ties go to the key seen first. Returns None for an empty breakdown.
pub fn top_key(groups: &GroupTotals) -> Option<(&str, Money)> {
    let mut best: Option<&GroupEntry> = None;
    for entry in groups.iter() {
        match best {
            Some(current) if entry.amount <= current.amount => {}
            _ => best = Some(entry),
        }
    }
    best.map(|e| (e.key.as_str(), e.amount))
}

/// Total for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    pub month: Month,
    pub amount: Money,
}

impl MonthTotal {
    /// `YYYY-MM` label
    pub fn label(&self) -> String {
        self.month.to_string()
    }
}

/// Bucket records by calendar month and keep the latest `window` months
///
/// Buckets come back in ascending chronological order. Months without any
/// records are left out rather than filled with zero.
pub fn month_buckets<T, D, A>(records: &[T], date: D, amount: A, window: usize) -> Vec<MonthTotal>
where
    D: Fn(&T) -> NaiveDate,
    A: Fn(&T) -> Money,
{
    let mut buckets: BTreeMap<Month, Money> = BTreeMap::new();
    for record in records {
        *buckets.entry(Month::of(date(record))).or_default() += amount(record);
    }

    let skip = buckets.len().saturating_sub(window);
    buckets
        .into_iter()
        .skip(skip)
        .map(|(month, amount)| MonthTotal { month, amount })
        .collect()
}

/// Records whose date falls in `month`
pub fn filter_month<T, D>(records: &[T], date: D, month: Month) -> Vec<&T>
where
    D: Fn(&T) -> NaiveDate,
{
    records.iter().filter(|r| month.contains(date(*r))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rec {
        category: Option<String>,
        amount: Money,
        date: NaiveDate,
    }

    fn rec(category: Option<&str>, units: i64, y: i32, m: u32, d: u32) -> Rec {
        Rec {
            category: category.map(str::to_string),
            amount: Money::from_units(units),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    fn by_category(records: &[Rec]) -> GroupTotals {
        group_totals(records, |r| r.category.as_deref(), |r| r.amount)
    }

    #[test]
    fn test_total_empty_is_zero() {
        let records: Vec<Rec> = Vec::new();
        assert_eq!(total(&records, |r| r.amount), Money::zero());
    }

    #[test]
    fn test_total_sums_amounts() {
        let records = vec![
            rec(Some("food"), 300, 2025, 1, 1),
            rec(Some("transport"), 200, 2025, 1, 2),
            rec(None, 5, 2025, 1, 3),
        ];
        assert_eq!(total(&records, |r| r.amount), Money::from_units(505));
    }

    #[test]
    fn test_totals_of_largest_amounts_do_not_overflow() {
        let records: Vec<Rec> = (0..3)
            .map(|_| Rec {
                category: Some("food".into()),
                amount: Money::from_cents(i64::MAX / 2),
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            })
            .collect();

        let saturated = Money::from_cents(i64::MAX);
        assert_eq!(total(&records, |r| r.amount), saturated);
        assert_eq!(by_category(&records).get("food"), Some(saturated));
        assert_eq!(month_buckets(&records, |r| r.date, |r| r.amount, 6)[0].amount, saturated);
    }

    #[test]
    fn test_group_totals_example() {
        let records = vec![
            rec(Some("food"), 300, 2025, 1, 1),
            rec(Some("transport"), 200, 2025, 1, 2),
        ];
        let groups = by_category(&records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("food"), Some(Money::from_units(300)));
        assert_eq!(groups.get("transport"), Some(Money::from_units(200)));
        assert_eq!(top_key(&groups), Some(("food", Money::from_units(300))));
    }

    #[test]
    fn test_group_totals_is_a_partition() {
        let records = vec![
            rec(Some("food"), 12, 2025, 1, 1),
            rec(Some("Food"), 7, 2025, 1, 1),
            rec(None, 3, 2025, 1, 1),
            rec(Some(""), 4, 2025, 1, 1),
            rec(Some("food"), 1, 2025, 1, 1),
        ];
        let groups = by_category(&records);

        assert_eq!(groups.total(), total(&records, |r| r.amount));
        // Keys are case-sensitive
        assert_eq!(groups.get("food"), Some(Money::from_units(13)));
        assert_eq!(groups.get("Food"), Some(Money::from_units(7)));
        // Missing and blank keys land in the fallback
        assert_eq!(groups.get("Other"), Some(Money::from_units(7)));
    }

    #[test]
    fn test_custom_fallback_label() {
        let records = vec![rec(None, 3, 2025, 1, 1)];
        let groups = group_totals_with_fallback(
            &records,
            |r| r.category.as_deref(),
            |r| r.amount,
            "Uncategorized",
        );
        assert_eq!(groups.get("Uncategorized"), Some(Money::from_units(3)));
        assert_eq!(groups.get("Other"), None);
    }

    #[test]
    fn test_group_order_is_first_seen() {
        let records = vec![
            rec(Some("b"), 1, 2025, 1, 1),
            rec(Some("a"), 1, 2025, 1, 1),
            rec(Some("b"), 1, 2025, 1, 1),
            rec(Some("c"), 1, 2025, 1, 1),
        ];
        let groups = by_category(&records);
        let keys: Vec<&str> = groups.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_top_key_tie_goes_to_first_seen() {
        let records = vec![
            rec(Some("rent"), 50, 2025, 1, 1),
            rec(Some("food"), 100, 2025, 1, 1),
            rec(Some("travel"), 100, 2025, 1, 1),
        ];
        assert_eq!(
            top_key(&by_category(&records)),
            Some(("food", Money::from_units(100)))
        );
    }

    #[test]
    fn test_top_key_empty() {
        assert_eq!(top_key(&GroupTotals::new()), None);
    }

    #[test]
    fn test_sorted_desc_is_stable() {
        let records = vec![
            rec(Some("a"), 10, 2025, 1, 1),
            rec(Some("b"), 30, 2025, 1, 1),
            rec(Some("c"), 10, 2025, 1, 1),
        ];
        let groups = by_category(&records);
        let keys: Vec<&str> = groups.sorted_desc().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_month_buckets_are_chronological_and_sparse() {
        let records = vec![
            rec(None, 10, 2025, 3, 5),
            rec(None, 20, 2024, 12, 31),
            rec(None, 5, 2025, 3, 20),
            rec(None, 1, 2025, 1, 1),
        ];
        let buckets = month_buckets(&records, |r| r.date, |r| r.amount, DEFAULT_TREND_WINDOW);

        let labels: Vec<String> = buckets.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["2024-12", "2025-01", "2025-03"]);
        assert_eq!(buckets[2].amount, Money::from_units(15));
    }

    #[test]
    fn test_month_buckets_keep_latest_window() {
        let records: Vec<Rec> = (1..=9).map(|m| rec(None, m as i64, 2025, m, 1)).collect();
        let buckets = month_buckets(&records, |r| r.date, |r| r.amount, 6);

        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0].month, Month::new(2025, 4).unwrap());
        assert_eq!(buckets[5].month, Month::new(2025, 9).unwrap());
        assert!(buckets.windows(2).all(|w| w[0].month < w[1].month));
    }

    #[test]
    fn test_month_buckets_zero_window() {
        let records = vec![rec(None, 1, 2025, 1, 1)];
        assert!(month_buckets(&records, |r| r.date, |r| r.amount, 0).is_empty());
    }

    #[test]
    fn test_filter_month_and_range() {
        let records = vec![
            rec(None, 1, 2025, 1, 31),
            rec(None, 2, 2025, 2, 1),
            rec(None, 3, 2025, 2, 28),
        ];
        let feb = Month::new(2025, 2).unwrap();
        assert_eq!(filter_month(&records, |r| r.date, feb).len(), 2);
    }
}

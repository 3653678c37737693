//! Generic JSON-backed record collection
//!
//! Each entity lives in its own `data/<name>.json` file holding
//! `{"records": [...]}`. The collection keeps an in-memory map guarded by a
//! `RwLock`; nothing reaches disk until [`Collection::save`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::ValidationError;

use super::file_io::{read_json, write_json_atomic};

/// A record type that can be stored in a [`Collection`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + fmt::Display;

    const ENTITY: EntityType;

    fn id(&self) -> Self::Id;

    /// Short description used in audit entries and messages
    fn label(&self) -> String;

    /// Date the record is listed by
    fn sort_date(&self) -> NaiveDate;

    fn created_at(&self) -> DateTime<Utc>;

    /// Mark the record as modified now
    fn touch(&mut self);

    fn validate_record(&self) -> Result<(), ValidationError>;

    /// Whether user input (full id, short id or prefix) names this record
    fn matches(&self, input: &str) -> bool;

    /// Whether `other` occupies a slot only one record may hold
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

#[derive(Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct CollectionFile<T> {
    #[serde(default)]
    records: Vec<T>,
}

impl<T> Default for CollectionFile<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// In-memory records of one entity, persisted to a single JSON file
pub struct Collection<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

fn lock_error(e: impl fmt::Display) -> FintrackError {
    FintrackError::Storage(format!("Failed to acquire lock: {}", e))
}

impl<T: Record> Collection<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory records with the file's contents
    pub fn load(&self) -> FintrackResult<()> {
        let file: CollectionFile<T> = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for record in file.records {
            data.insert(record.id(), record);
        }

        log::debug!(
            "Loaded {} {} records from {}",
            data.len(),
            T::ENTITY.as_str(),
            self.path.display()
        );
        Ok(())
    }

    pub fn save(&self) -> FintrackResult<()> {
        let records = self.get_all()?;
        let count = records.len();
        write_json_atomic(&self.path, &CollectionFile { records })?;

        log::debug!(
            "Saved {} {} records to {}",
            count,
            T::ENTITY.as_str(),
            self.path.display()
        );
        Ok(())
    }

    pub fn get(&self, id: T::Id) -> FintrackResult<Option<T>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All records ordered by date, then by creation time
    pub fn get_all(&self) -> FintrackResult<Vec<T>> {
        let data = self.data.read().map_err(lock_error)?;
        let mut records: Vec<T> = data.values().cloned().collect();
        records.sort_by(|a, b| {
            a.sort_date()
                .cmp(&b.sort_date())
                .then(a.created_at().cmp(&b.created_at()))
        });
        Ok(records)
    }

    /// Look a record up from user input
    ///
    /// Fails with NotFound when nothing matches and with a validation error
    /// when a short prefix matches more than one record.
    pub fn find(&self, input: &str) -> FintrackResult<T> {
        let data = self.data.read().map_err(lock_error)?;
        let mut matches = data.values().filter(|r| r.matches(input));

        let first = matches
            .next()
            .cloned()
            .ok_or_else(|| FintrackError::not_found(T::ENTITY.label(), input))?;

        if matches.next().is_some() {
            return Err(FintrackError::Validation(format!(
                "'{}' matches more than one {}; use a longer id",
                input,
                T::ENTITY.as_str()
            )));
        }

        Ok(first)
    }

    /// Validate and store a record, returning the one it replaced
    pub fn upsert(&self, record: T) -> FintrackResult<Option<T>> {
        record.validate_record()?;

        let mut data = self.data.write().map_err(lock_error)?;
        let id = record.id();
        if data
            .values()
            .any(|other| other.id() != id && record.conflicts_with(other))
        {
            return Err(FintrackError::Duplicate {
                entity_type: T::ENTITY.label(),
                identifier: record.label(),
            });
        }

        Ok(data.insert(id, record))
    }

    pub fn delete(&self, id: T::Id) -> FintrackResult<Option<T>> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }

    pub fn count(&self) -> FintrackResult<usize> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Expense, Money, Month};
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn expenses(temp_dir: &TempDir) -> Collection<Expense> {
        Collection::new(temp_dir.path().join("expenses.json"))
    }

    #[test]
    fn test_upsert_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let collection = expenses(&temp_dir);

        let expense = Expense::new(Money::from_units(12), "Food", date(3));
        let id = expense.id;
        assert!(collection.upsert(expense).unwrap().is_none());
        collection.save().unwrap();

        let reloaded = expenses(&temp_dir);
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 1);
        assert_eq!(reloaded.get(id).unwrap().unwrap().category, "Food");
    }

    #[test]
    fn test_get_all_sorted_by_date() {
        let temp_dir = TempDir::new().unwrap();
        let collection = expenses(&temp_dir);
        for day in [9, 2, 5] {
            collection
                .upsert(Expense::new(Money::from_units(1), "Food", date(day)))
                .unwrap();
        }

        let days: Vec<NaiveDate> = collection
            .get_all()
            .unwrap()
            .iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(days, vec![date(2), date(5), date(9)]);
    }

    #[test]
    fn test_upsert_rejects_invalid_record() {
        let temp_dir = TempDir::new().unwrap();
        let collection = expenses(&temp_dir);

        let result = collection.upsert(Expense::new(Money::from_units(-5), "Food", date(1)));
        assert!(matches!(result, Err(FintrackError::Validation(_))));
        assert_eq!(collection.count().unwrap(), 0);
    }

    #[test]
    fn test_find_by_short_id() {
        let temp_dir = TempDir::new().unwrap();
        let collection = expenses(&temp_dir);
        let expense = Expense::new(Money::from_units(3), "Transport", date(4));
        let short = expense.id.to_string();
        collection.upsert(expense.clone()).unwrap();

        assert_eq!(collection.find(&short).unwrap().id, expense.id);
        assert!(collection.find("exp-ffffffff").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let collection = expenses(&temp_dir);
        let expense = Expense::new(Money::from_units(3), "Food", date(4));
        let id = expense.id;
        collection.upsert(expense).unwrap();

        assert!(collection.delete(id).unwrap().is_some());
        assert!(collection.delete(id).unwrap().is_none());
    }

    #[test]
    fn test_one_budget_per_month() {
        let temp_dir = TempDir::new().unwrap();
        let budgets: Collection<Budget> = Collection::new(temp_dir.path().join("budgets.json"));
        let jan = Month::new(2025, 1).unwrap();

        budgets
            .upsert(Budget::new(jan, Money::from_units(500)))
            .unwrap();
        let second = budgets.upsert(Budget::new(jan, Money::from_units(600)));
        assert!(matches!(second, Err(FintrackError::Duplicate { .. })));

        // The month string finds the budget too
        assert_eq!(budgets.find("2025-01").unwrap().total_budget, Money::from_units(500));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let collection = expenses(&temp_dir);
        collection.load().unwrap();
        assert_eq!(collection.count().unwrap(), 0);
    }
}

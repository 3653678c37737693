//! Storage layer for fintrack
//!
//! One JSON file per entity under `data/`, written atomically, plus the
//! append-only audit log. [`Storage::snapshot`] hands analytics an owned copy
//! of every record.

pub mod collection;
pub mod file_io;
pub mod init;
pub mod records;

pub use collection::{Collection, Record};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::FintrackPaths;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    Budget, Expense, FinanceSnapshot, Goal, Income, Investment, RecurringTransaction,
    SplitExpense,
};

/// Access to every collection and the audit log
pub struct Storage {
    paths: FintrackPaths,
    pub expenses: Collection<Expense>,
    pub income: Collection<Income>,
    pub budgets: Collection<Budget>,
    pub investments: Collection<Investment>,
    pub goals: Collection<Goal>,
    pub recurring: Collection<RecurringTransaction>,
    pub splits: Collection<SplitExpense>,
    audit: AuditLogger,
}

impl Storage {
    pub fn new(paths: FintrackPaths) -> Result<Self, FintrackError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: Collection::new(paths.expenses_file()),
            income: Collection::new(paths.income_file()),
            budgets: Collection::new(paths.budgets_file()),
            investments: Collection::new(paths.investments_file()),
            goals: Collection::new(paths.goals_file()),
            recurring: Collection::new(paths.recurring_file()),
            splits: Collection::new(paths.splits_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> FintrackResult<()> {
        self.expenses.load()?;
        self.income.load()?;
        self.budgets.load()?;
        self.investments.load()?;
        self.goals.load()?;
        self.recurring.load()?;
        self.splits.load()?;
        Ok(())
    }

    /// Owned copy of every record, each collection in listing order
    pub fn snapshot(&self) -> FintrackResult<FinanceSnapshot> {
        Ok(FinanceSnapshot {
            expenses: self.expenses.get_all()?,
            income: self.income.get_all()?,
            budgets: self.budgets.get_all()?,
            investments: self.investments.get_all()?,
            goals: self.goals.get_all()?,
            recurring: self.recurring.get_all()?,
            splits: self.splits.get_all()?,
        })
    }

    /// Store a new record, persist its collection and audit the creation
    pub fn create<T: Record>(&self, collection: &Collection<T>, record: T) -> FintrackResult<T> {
        collection.upsert(record.clone())?;
        collection.save()?;

        self.audit.log(&AuditEntry::create(
            T::ENTITY,
            record.id().to_string(),
            Some(record.label()),
            &record,
        ))?;
        Ok(record)
    }

    /// Replace an existing record and audit the change
    pub fn update<T: Record>(&self, collection: &Collection<T>, mut record: T) -> FintrackResult<T> {
        let before = collection
            .get(record.id())?
            .ok_or_else(|| FintrackError::not_found(T::ENTITY.label(), record.id().to_string()))?;

        record.touch();
        collection.upsert(record.clone())?;
        collection.save()?;

        self.audit.log(&AuditEntry::update(
            T::ENTITY,
            record.id().to_string(),
            Some(record.label()),
            &before,
            &record,
        ))?;
        Ok(record)
    }

    /// Remove a record and audit the deletion
    pub fn delete<T: Record>(&self, collection: &Collection<T>, id: T::Id) -> FintrackResult<T> {
        let removed = collection
            .delete(id)?
            .ok_or_else(|| FintrackError::not_found(T::ENTITY.label(), id.to_string()))?;
        collection.save()?;

        self.audit.log(&AuditEntry::delete(
            T::ENTITY,
            id.to_string(),
            Some(removed.label()),
            &removed,
        ))?;
        Ok(removed)
    }
}

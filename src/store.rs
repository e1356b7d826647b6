//! The expense store owns the authoritative in-memory collection and writes it through to
//! [`Storage`] after every mutation.

use crate::filter::{filter_expenses, ExpenseFilters};
use crate::model::{Expense, ExpenseUpdates, NewExpense};
use crate::storage::{Persisted, Storage};
use crate::summary::{self, ExpenseSummary, VendorStats};
use chrono::{Local, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

/// The result of a mutation: the operation's value together with the outcome of persisting the
/// collection afterwards. The in-memory change holds either way.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit<T> {
    value: T,
    persisted: Persisted,
}

impl<T> Commit<T> {
    fn new(value: T, persisted: Persisted) -> Self {
        Self { value, persisted }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn persisted(&self) -> &Persisted {
        &self.persisted
    }

    pub fn is_saved(&self) -> bool {
        self.persisted.is_saved()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Persisted) {
        (self.value, self.persisted)
    }
}

/// Holds the expense collection in insertion order.
///
/// A new store is empty until [`ExpenseStore::load`] is called. After that, the in-memory
/// collection is authoritative: it is never re-read from storage, and a failed save does not
/// roll back a mutation.
#[derive(Debug)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    storage: Storage,
}

impl ExpenseStore {
    pub fn new(storage: Storage) -> Self {
        Self {
            expenses: Vec::new(),
            storage,
        }
    }

    /// Creates a store and loads the persisted collection into it.
    pub fn open(storage: Storage) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Replaces the in-memory collection with the persisted one.
    pub fn load(&mut self) {
        self.expenses = self.storage.load();
        debug!("The expense store holds {} expenses", self.expenses.len());
    }

    /// Appends a new expense with a fresh id and returns the id.
    pub fn add(&mut self, data: NewExpense) -> Commit<String> {
        let id = Uuid::new_v4().to_string();
        let expense = Expense::new(id.clone(), data, Utc::now());
        self.expenses.push(expense);
        info!("Added expense {id}");
        Commit::new(id, self.save())
    }

    /// Merges `updates` over the expense with `id`. Returns whether a matching expense exists.
    /// The collection is persisted even if nothing matched.
    pub fn update(&mut self, id: &str, updates: ExpenseUpdates) -> Commit<bool> {
        let found = match self.expenses.iter_mut().find(|e| e.id() == id) {
            Some(expense) => {
                expense.apply(updates, Utc::now());
                info!("Updated expense {id}");
                true
            }
            None => {
                debug!("No expense with id {id} to update");
                false
            }
        };
        Commit::new(found, self.save())
    }

    /// Removes the expense with `id`. Returns whether an expense was removed. The collection is
    /// persisted even if nothing matched.
    pub fn delete(&mut self, id: &str) -> Commit<bool> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id() != id);
        let removed = self.expenses.len() != before;
        if removed {
            info!("Deleted expense {id}");
        } else {
            debug!("No expense with id {id} to delete");
        }
        Commit::new(removed, self.save())
    }

    /// Drops every expense and removes the stored collection. Returns how many were dropped.
    pub fn clear(&mut self) -> Commit<usize> {
        let count = self.expenses.len();
        self.expenses.clear();
        info!("Cleared {count} expenses");
        Commit::new(count, self.storage.clear())
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// The expenses matching `filters`, in insertion order.
    pub fn filtered(&self, filters: &ExpenseFilters) -> Vec<&Expense> {
        filter_expenses(&self.expenses, filters)
    }

    /// The summary of the whole collection, with the monthly total for the current local month.
    pub fn summary(&self) -> ExpenseSummary {
        summary::summarize(&self.expenses, Local::now().date_naive())
    }

    pub fn vendor_stats(&self) -> VendorStats {
        summary::vendor_stats(&self.expenses)
    }

    fn save(&self) -> Persisted {
        self.storage.save(&self.expenses)
    }
}

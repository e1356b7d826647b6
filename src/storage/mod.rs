//! The persistence gateway: reads and writes the whole expense collection under a single key.
//!
//! Every operation is best-effort. A failing backend degrades to "no persisted data" on load,
//! and to an in-memory-only change on save, reported as [`Persisted::NotSaved`].

mod kv;

pub use kv::{FileStore, KeyValueStore, MemoryStore};

use crate::model::Expense;
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use tracing::{debug, warn};

/// The key under which the expense collection is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "expense-tracker-data";

/// The outcome of a write to storage.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Persisted {
    /// The change was durably written.
    Saved,
    /// The change only exists in memory. Holds the reason the write failed.
    NotSaved(String),
}

impl Persisted {
    pub fn is_saved(&self) -> bool {
        matches!(self, Persisted::Saved)
    }

    fn from_result(result: Result<()>, action: &str) -> Self {
        match result {
            Ok(()) => Persisted::Saved,
            Err(e) => {
                warn!("Unable to {action}, changes may not be saved: {e:#}");
                Persisted::NotSaved(format!("{e:#}"))
            }
        }
    }
}

/// Stores the full expense collection as JSON under one key of a [`KeyValueStore`].
///
/// There is no cache: every `load` reads the backend again.
#[derive(Debug)]
pub struct Storage {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            backend: Box::new(backend),
            key: key.into(),
        }
    }

    /// Creates a `Storage` that uses [`DEFAULT_STORAGE_KEY`].
    pub fn with_default_key(backend: impl KeyValueStore + 'static) -> Self {
        Self::new(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the stored collection. Nothing stored yields an empty collection.
    ///
    /// # Errors
    /// - Returns an error if the backend cannot be read.
    /// - Returns an error if the stored value is not a valid expense collection.
    pub fn try_load(&self) -> Result<Vec<Expense>> {
        let data = match self.backend.get(&self.key)? {
            Some(data) => data,
            None => return Ok(Vec::new()),
        };
        serde_json::from_str(&data)
            .with_context(|| format!("Stored expenses under '{}' are corrupt", self.key))
    }

    /// Returns the stored collection, or an empty one if there is none or it cannot be read.
    /// Failures are logged and never returned.
    pub fn load(&self) -> Vec<Expense> {
        match self.try_load() {
            Ok(expenses) => {
                debug!("Loaded {} expenses from '{}'", expenses.len(), self.key);
                expenses
            }
            Err(e) => {
                warn!("Unable to load expenses, continuing without stored data: {e:#}");
                Vec::new()
            }
        }
    }

    /// Writes the entire collection, replacing whatever was stored before.
    pub fn save(&self, expenses: &[Expense]) -> Persisted {
        let result = serde_json::to_string(expenses)
            .context("Unable to serialize expenses")
            .and_then(|json| self.backend.set(&self.key, &json));
        let persisted = Persisted::from_result(result, "save expenses");
        if persisted.is_saved() {
            debug!("Saved {} expenses to '{}'", expenses.len(), self.key);
        }
        persisted
    }

    /// Removes the stored collection entirely.
    pub fn clear(&self) -> Persisted {
        let persisted = Persisted::from_result(self.backend.remove(&self.key), "clear expenses");
        if persisted.is_saved() {
            debug!("Cleared stored expenses under '{}'", self.key);
        }
        persisted
    }
}

//! Key-value backends for the persistence gateway.

use crate::{utils, Result};
use anyhow::{bail, ensure};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::trace;

/// A durable string key-value store, the single I/O boundary of the application.
pub trait KeyValueStore: Debug {
    /// Returns the value stored under `key`, or `None` if nothing is stored there.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a key that does not exist succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Implements `KeyValueStore` with one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        ensure!(!key.is_empty(), "A storage key cannot be empty");
        ensure!(
            !key.contains(['/', '\\']) && key != "." && key != "..",
            "Invalid storage key '{key}'"
        );
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        trace!("get {}", path.display());
        if !path.is_file() {
            return Ok(None);
        }
        utils::read(&path).map(Some)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        trace!("set {}", path.display());
        utils::write(&path, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        trace!("remove {}", path.display());
        utils::remove(&path)
    }
}

/// Implements `KeyValueStore` in memory. Clones share the same entries, so a caller can keep a
/// handle to inspect what was written through another clone.
///
/// The store can be switched to unavailable, in which case every call fails. This simulates a
/// backend that is disabled or out of quota.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    available: Rc<Cell<bool>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            entries: Rc::default(),
            available: Rc::new(Cell::new(true)),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store on which every operation fails.
    pub fn unavailable() -> Self {
        let store = Self::default();
        store.set_available(false);
        store
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    fn check(&self) -> Result<()> {
        if !self.available.get() {
            bail!("The in-memory store is unavailable");
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        let _ = self
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check()?;
        let _ = self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

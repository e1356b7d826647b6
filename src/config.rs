//! Configuration file handling for the expense tracker.
//!
//! The configuration file is stored at `$EXPENSES_HOME/config.json`. It names the storage key
//! the expense collection is saved under and, optionally, where the data directory lives.

use crate::storage::{FileStore, Storage, DEFAULT_STORAGE_KEY};
use crate::store::ExpenseStore;
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA: &str = "data";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSES_HOME` and from there it loads `$EXPENSES_HOME/config.json`. It resolves
/// the data directory, where the file-backed storage keeps one JSON file per storage key.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    data_dir: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, the data directory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the expenses home, e.g. `$HOME/expenses`
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists in `dir`.
    /// - Returns an error if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the expenses home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "The expenses home is already initialized, '{}' exists",
                config_path.display()
            )
        }

        let config_file = ConfigFile::default();
        let data_dir = resolve(&root, config_file.data_dir());
        utils::make_dir(&data_dir).context("Unable to create the data directory")?;
        config_file.save(&config_path)?;

        Ok(Self {
            root,
            config_path,
            data_dir,
            config_file,
        })
    }

    /// This will
    /// - validate that `expenses_home` exists and that the config file exists
    /// - load and validate the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub fn load(expenses_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = expenses_home.into();
        let root = utils::canonicalize(&maybe_relative).context("The expenses home is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path)?;

        let data_dir = resolve(&root, config_file.data_dir());
        if !data_dir.is_dir() {
            bail!("The data directory is missing '{}'", data_dir.display())
        }

        Ok(Self {
            root,
            config_path,
            data_dir,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn storage_key(&self) -> &str {
        &self.config_file.storage_key
    }

    /// Builds the persistence gateway over the data directory.
    pub fn storage(&self) -> Storage {
        Storage::new(FileStore::new(&self.data_dir), self.storage_key())
    }

    /// Opens an expense store loaded from this configuration's storage.
    pub fn open_store(&self) -> ExpenseStore {
        ExpenseStore::open(self.storage())
    }
}

/// Returns `p` if it is absolute, otherwise joins it onto `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "storage_key": "expense-tracker-data",
///   "data_dir": "data"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The key the expense collection is stored under
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// Path to the data directory (optional, relative to the expenses home or absolute)
    /// Defaults to $EXPENSES_HOME/data if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            storage_key: default_storage_key(),
            data_dir: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path and validates it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or holds invalid settings
    fn load(path: &Path) -> Result<Self> {
        let config: ConfigFile = utils::deserialize(path).context("Unable to load config file")?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version in config file: expected {}, got {}",
            CONFIG_VERSION,
            config.config_version
        );
        ensure!(
            !config.storage_key.trim().is_empty(),
            "The storage_key in the config file cannot be empty"
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data).context("Unable to write config file")
    }

    /// If the path is relative, it should be interpreted as relative to the expenses home.
    /// If None, defaults to $EXPENSES_HOME/data
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from(DATA))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, NewExpense};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    #[test]
    fn test_create_then_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("expenses");
        let created = Config::create(&home).unwrap();
        assert!(created.config_path().is_file());
        assert!(created.data_dir().is_dir());
        assert_eq!(created.data_dir(), created.root().join("data"));
        assert_eq!(created.storage_key(), DEFAULT_STORAGE_KEY);

        let loaded = Config::load(&home).unwrap();
        assert_eq!(loaded.root(), created.root());
        assert_eq!(loaded.data_dir(), created.data_dir());
        assert_eq!(loaded.config_file, created.config_file);
    }

    #[test]
    fn test_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).unwrap();
        let err = Config::create(dir.path()).unwrap_err();
        assert!(err.to_string().contains("already initialized"));
    }

    #[test]
    fn test_load_missing_home() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("The config file is missing"));
    }

    #[test]
    fn test_load_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).unwrap();
        std::fs::remove_dir(config.data_dir()).unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("The data directory is missing"));
    }

    #[test]
    fn test_wrong_app_name() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_JSON),
            r#"{"app_name": "budget", "config_version": 1}"#,
        )
        .unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid app_name"));
    }

    #[test]
    fn test_custom_settings() {
        let dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let config_file = ConfigFile {
            data_dir: Some(elsewhere.path().to_path_buf()),
            storage_key: "household".to_string(),
            ..ConfigFile::default()
        };
        config_file.save(&dir.path().join(CONFIG_JSON)).unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.data_dir(), elsewhere.path());
        assert_eq!(config.storage_key(), "household");
        assert_eq!(config.storage().key(), "household");
    }

    #[test]
    fn test_storage_key_defaults_when_absent() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_JSON),
            r#"{"app_name": "expenses", "config_version": 1}"#,
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.storage_key(), DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_open_store_persists_to_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).unwrap();
        let mut store = config.open_store();
        let commit = store.add(NewExpense {
            amount: Decimal::from(12),
            category: Category::Shopping,
            description: "Socks".to_string(),
            vendor: Some("Stockmann".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        });
        assert!(commit.is_saved());
        assert!(config
            .data_dir()
            .join(format!("{DEFAULT_STORAGE_KEY}.json"))
            .is_file());
        assert_eq!(config.open_store().len(), 1);
    }
}

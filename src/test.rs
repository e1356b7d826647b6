//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Category, NewExpense};
use crate::Config;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment that sets up an initialized expenses home directory.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::create(temp_dir.path().join("expenses")).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Adds an expense directly through the store and returns its id.
    pub fn insert_expense(
        &self,
        amount: &str,
        category: Category,
        description: &str,
        vendor: Option<&str>,
        date: &str,
    ) -> String {
        let mut store = self.config.open_store();
        let commit = store.add(NewExpense {
            amount: Decimal::from_str(amount).unwrap(),
            category,
            description: description.to_string(),
            vendor: vendor.map(str::to_string),
            date: NaiveDate::from_str(date).unwrap(),
        });
        assert!(commit.is_saved());
        commit.into_value()
    }

    /// Inserts the three expenses of the canonical vendor example: two at "Cafe Central" and one
    /// at "Public Transit", totalling 70.50.
    pub fn insert_sample_expenses(&self) -> Vec<String> {
        vec![
            self.insert_expense("25.50", Category::Food, "Lunch", Some("Cafe Central"), "2023-12-25"),
            self.insert_expense("30.00", Category::Food, "Dinner", Some("Cafe Central"), "2023-12-26"),
            self.insert_expense(
                "15.00",
                Category::Transportation,
                "Bus ticket",
                Some("Public Transit"),
                "2023-12-25",
            ),
        ]
    }
}

//! Validation of raw user input before it reaches the store.
//!
//! The store accepts whatever it is given, so every user-facing path that creates or edits an
//! expense goes through [`ExpenseForm::validate`] first.

use crate::model::{amount, Category, Expense, NewExpense};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const AMOUNT_REQUIRED: &str = "Please enter an amount";
pub(crate) const AMOUNT_INVALID: &str = "Please enter a valid amount (e.g., 15,50)";
pub(crate) const AMOUNT_NOT_POSITIVE: &str = "Amount must be greater than 0";
pub(crate) const AMOUNT_TOO_LARGE: &str = "Amount must be at most 999 999 999,99";
pub(crate) const DESCRIPTION_REQUIRED: &str = "Please enter a description";
pub(crate) const VENDOR_REQUIRED: &str = "Please enter a vendor";
pub(crate) const DATE_REQUIRED: &str = "Please select a date";

/// The form fields that can fail validation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Amount,
    Description,
    Vendor,
    Date,
}

serde_plain::derive_display_from_serialize!(Field);

/// Raw input for creating or editing an expense, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    /// The amount in decimal-comma notation, e.g. `15,50`.
    pub amount: String,
    pub category: Category,
    pub description: String,
    pub vendor: String,
    pub date: Option<NaiveDate>,
}

impl ExpenseForm {
    /// Pre-fills a form from an existing expense for editing. The amount is rendered with
    /// [`amount::format`], which [`ExpenseForm::validate`] accepts again.
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: amount::format(expense.amount()),
            category: expense.category(),
            description: expense.description().to_string(),
            vendor: expense.vendor().unwrap_or_default().to_string(),
            date: Some(expense.date()),
        }
    }

    /// Checks every field and, if all pass, returns the normalized data for the store. The
    /// description and vendor are trimmed.
    ///
    /// # Errors
    /// Returns every failing field with its message.
    pub fn validate(&self) -> Result<NewExpense, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let amount = match validate_amount(&self.amount) {
            Ok(amount) => Some(amount),
            Err(message) => {
                errors.insert(Field::Amount, message);
                None
            }
        };

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert(Field::Description, DESCRIPTION_REQUIRED);
        }

        let vendor = self.vendor.trim();
        if vendor.is_empty() {
            errors.insert(Field::Vendor, VENDOR_REQUIRED);
        }

        if self.date.is_none() {
            errors.insert(Field::Date, DATE_REQUIRED);
        }

        match (amount, self.date) {
            (Some(amount), Some(date)) if errors.is_empty() => Ok(NewExpense {
                amount,
                category: self.category,
                description: description.to_string(),
                vendor: Some(vendor.to_string()),
                date,
            }),
            _ => Err(errors),
        }
    }
}

fn validate_amount(text: &str) -> Result<Decimal, &'static str> {
    if text.trim().is_empty() {
        return Err(AMOUNT_REQUIRED);
    }
    if !amount::is_valid(text) {
        return Err(AMOUNT_INVALID);
    }
    let value = match amount::try_parse(text) {
        Some(value) if value <= amount::max_amount() => value,
        _ => return Err(AMOUNT_TOO_LARGE),
    };
    if value <= Decimal::ZERO {
        return Err(AMOUNT_NOT_POSITIVE);
    }
    Ok(value)
}

/// Field-level validation messages, at most one per field.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    fn insert(&mut self, field: Field, message: impl Into<String>) {
        let _ = self.0.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl Error for ValidationErrors {}

use crate::model::Category;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// The vendor bucket used for expenses that have no vendor, or only whitespace.
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// A single recorded expense.
///
/// The `id` and both timestamps are owned by the store: `id` and `created_at` never change
/// after creation, `updated_at` is refreshed on every mutation.
///
/// The JSON form is the persisted layout: camelCase field names, `amount` as a plain number,
/// `date` as `YYYY-MM-DD` and the timestamps as RFC 3339 date-times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub(crate) id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
    pub(crate) category: Category,
    pub(crate) description: String,
    /// Stored exactly as entered. Absent and blank vendors are only mapped to
    /// [`UNKNOWN_VENDOR`] when aggregating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) vendor: Option<String>,
    #[serde(with = "calendar_date")]
    pub(crate) date: NaiveDate,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Expense {
    /// Creates a new expense from user data, stamping both timestamps with `now`.
    pub(crate) fn new(id: String, data: NewExpense, now: DateTime<Utc>) -> Self {
        Self {
            id,
            amount: data.amount,
            category: data.category,
            description: data.description,
            vendor: data.vendor,
            date: data.date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges every field that is `Some` in `updates` over this expense and refreshes
    /// `updated_at`.
    pub(crate) fn apply(&mut self, updates: ExpenseUpdates, now: DateTime<Utc>) {
        let ExpenseUpdates {
            amount,
            category,
            description,
            vendor,
            date,
        } = updates;
        if let Some(amount) = amount {
            self.amount = amount;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(vendor) = vendor {
            self.vendor = vendor;
        }
        if let Some(date) = date {
            self.date = date;
        }
        self.updated_at = now;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    /// The name this expense is grouped under in vendor statistics.
    pub fn vendor_name(&self) -> &str {
        match self.vendor.as_deref() {
            Some(vendor) if !vendor.trim().is_empty() => vendor,
            _ => UNKNOWN_VENDOR,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// The user-supplied fields of a new expense. The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub vendor: Option<String>,
    pub date: NaiveDate,
}

/// A partial update of an expense. Fields that are `None` remain unchanged.
///
/// Only the mutable fields are represented, so an update can never change an expense's id or
/// creation time. The vendor is optional on an expense, so `Some(None)` removes it. In JSON that
/// is an explicit `"vendor": null`, while a missing `vendor` leaves it unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdates {
    pub amount: Option<Decimal>,
    pub category: Option<Category>,
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub vendor: Option<Option<String>>,
    pub date: Option<NaiveDate>,
}

impl ExpenseUpdates {
    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        self == &ExpenseUpdates::default()
    }
}

/// Wraps a field that is present in `Some`, so that an explicit `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Parses a calendar date. Besides `YYYY-MM-DD`, an RFC 3339 date-time is accepted and reduced
/// to its date in the local time zone, which is how older data recorded the day the user picked.
fn parse_calendar_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, calendar_date::FORMAT).or_else(|e| {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&chrono::Local).date_naive())
            .map_err(|_| e)
    })
}

mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) const FORMAT: &str = "%Y-%m-%d";

    pub(super) fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_calendar_date(&s).map_err(serde::de::Error::custom)
    }
}

//! Order-preserving filtered views of the expense collection.

use crate::model::{Category, Expense};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Restricts a view to one category, or to none.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// No category constraint.
    #[default]
    All,
    Only(Category),
}

impl From<Option<Category>> for CategoryFilter {
    fn from(value: Option<Category>) -> Self {
        value.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

/// A combination of optional constraints. Every constraint that is present must hold for an
/// expense to be included. Empty strings count as absent.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilters {
    pub category: CategoryFilter,
    /// Case-insensitive exact match on the vendor.
    pub vendor: Option<String>,
    /// Inclusive lower bound. Only applied together with `date_to`.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound. Only applied together with `date_from`.
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive substring of the description, category, vendor or amount.
    pub search_query: Option<String>,
}

impl ExpenseFilters {
    /// Returns true if `expense` satisfies every constraint.
    pub fn matches(&self, expense: &Expense) -> bool {
        self.matches_category(expense)
            && self.matches_vendor(expense)
            && self.matches_dates(expense)
            && self.matches_search(expense)
    }

    fn matches_category(&self, expense: &Expense) -> bool {
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => expense.category() == category,
        }
    }

    fn matches_vendor(&self, expense: &Expense) -> bool {
        match non_empty(&self.vendor) {
            None => true,
            Some(wanted) => expense
                .vendor()
                .is_some_and(|vendor| vendor.to_lowercase() == wanted.to_lowercase()),
        }
    }

    fn matches_dates(&self, expense: &Expense) -> bool {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => (from..=to).contains(&expense.date()),
            _ => true,
        }
    }

    fn matches_search(&self, expense: &Expense) -> bool {
        let query = match non_empty(&self.search_query) {
            None => return true,
            Some(query) => query.to_lowercase(),
        };
        expense.description().to_lowercase().contains(&query)
            || expense.category().as_str().to_lowercase().contains(&query)
            || expense
                .vendor()
                .is_some_and(|vendor| vendor.to_lowercase().contains(&query))
            || expense.amount().normalize().to_string().contains(&query)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Returns the expenses that match `filters`, in the order of `expenses`.
pub fn filter_expenses<'a>(expenses: &'a [Expense], filters: &ExpenseFilters) -> Vec<&'a Expense> {
    expenses.iter().filter(|e| filters.matches(e)).collect()
}

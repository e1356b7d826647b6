//! Orderings for listing expenses. Sorting always happens on a copy of the view, the stored
//! order of the collection is insertion order and never changes.

use crate::model::Expense;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The field a listing is ordered by.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Date,
    Amount,
    /// By category name.
    Category,
}

serde_plain::derive_display_from_serialize!(SortField);
serde_plain::derive_fromstr_from_deserialize!(SortField);

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest or largest first.
    #[default]
    Desc,
}

serde_plain::derive_display_from_serialize!(SortOrder);
serde_plain::derive_fromstr_from_deserialize!(SortOrder);

impl SortField {
    fn compare(self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            SortField::Date => a.date().cmp(&b.date()),
            SortField::Amount => a.amount().cmp(&b.amount()),
            SortField::Category => a.category().as_str().cmp(b.category().as_str()),
        }
    }
}

/// Sorts `expenses` in place. The sort is stable, so expenses that compare equal keep their
/// relative order in either direction.
pub fn sort_expenses(expenses: &mut [&Expense], field: SortField, order: SortOrder) {
    expenses.sort_by(|a, b| match order {
        SortOrder::Asc => field.compare(a, b),
        SortOrder::Desc => field.compare(b, a),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, NewExpense};
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn expense(id: &str, amount: &str, category: Category, date: (i32, u32, u32)) -> Expense {
        Expense::new(
            id.to_string(),
            NewExpense {
                amount: Decimal::from_str(amount).unwrap(),
                category,
                description: id.to_string(),
                vendor: None,
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            },
            Utc::now(),
        )
    }

    fn expenses() -> Vec<Expense> {
        vec![
            expense("a", "25.50", Category::Food, (2023, 12, 25)),
            expense("b", "30", Category::Bills, (2023, 12, 26)),
            expense("c", "15", Category::Transportation, (2023, 12, 24)),
            expense("d", "4.20", Category::Food, (2023, 12, 25)),
        ]
    }

    fn sorted(field: SortField, order: SortOrder) -> Vec<String> {
        let all = expenses();
        let mut view: Vec<&Expense> = all.iter().collect();
        sort_expenses(&mut view, field, order);
        view.iter().map(|e| e.id().to_string()).collect()
    }

    #[test]
    fn test_sort_by_date() {
        assert_eq!(sorted(SortField::Date, SortOrder::Desc), ["b", "a", "d", "c"]);
        assert_eq!(sorted(SortField::Date, SortOrder::Asc), ["c", "a", "d", "b"]);
    }

    #[test]
    fn test_sort_by_amount() {
        assert_eq!(sorted(SortField::Amount, SortOrder::Desc), ["b", "a", "c", "d"]);
        assert_eq!(sorted(SortField::Amount, SortOrder::Asc), ["d", "c", "a", "b"]);
    }

    #[test]
    fn test_sort_by_category_name() {
        assert_eq!(sorted(SortField::Category, SortOrder::Asc), ["b", "a", "d", "c"]);
        assert_eq!(sorted(SortField::Category, SortOrder::Desc), ["c", "a", "d", "b"]);
    }

    #[test]
    fn test_sort_leaves_source_untouched() {
        let all = expenses();
        let mut view: Vec<&Expense> = all.iter().collect();
        sort_expenses(&mut view, SortField::Amount, SortOrder::Asc);
        let source: Vec<&str> = all.iter().map(|e| e.id()).collect();
        assert_eq!(source, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(SortField::default(), SortField::Date);
        assert_eq!(SortOrder::default(), SortOrder::Desc);
        assert_eq!(SortField::from_str("amount").unwrap(), SortField::Amount);
        assert_eq!(SortOrder::from_str("asc").unwrap(), SortOrder::Asc);
        assert_eq!(SortField::Category.to_string(), "category");
        assert!(SortField::from_str("vendor").is_err());
    }
}

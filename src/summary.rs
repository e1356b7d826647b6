//! Aggregate statistics over the whole expense collection: totals per category and month, and
//! totals per vendor.

use crate::model::{Category, Expense};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::ops;

const CATEGORY_COUNT: usize = Category::ALL.len();

/// The summed amount of each of the six categories. Unused categories hold zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotals {
    totals: [Decimal; CATEGORY_COUNT],
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> Decimal {
        self.totals[category as usize]
    }

    /// Iterates over every category, in enumeration order, with its total.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn sum(&self) -> Decimal {
        self.totals.iter().fold(Decimal::ZERO, |sum, &total| add(sum, total))
    }

    /// The category with the strictly highest total. The first in enumeration order wins a tie,
    /// and `None` is returned when every total is zero.
    pub fn top(&self) -> Option<TopCategory> {
        let mut top: Option<TopCategory> = None;
        for (category, amount) in self.iter() {
            let best = top.as_ref().map_or(Decimal::ZERO, |t| t.amount);
            if amount > best {
                top = Some(TopCategory { category, amount });
            }
        }
        top
    }
}

impl ops::AddAssign<&Expense> for CategoryTotals {
    fn add_assign(&mut self, expense: &Expense) {
        let total = &mut self.totals[expense.category() as usize];
        *total = add(*total, expense.amount());
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CATEGORY_COUNT))?;
        for (category, amount) in self.iter() {
            map.serialize_entry(&category, &Float(amount))?;
        }
        map.end()
    }
}

/// Adds two amounts, clamping to the representable range instead of overflowing. Validated input
/// cannot get near the bounds, but stored data is not validated again.
fn add(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(if amount.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// The summed amount of `expenses`.
pub fn total<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Decimal {
    expenses
        .into_iter()
        .fold(Decimal::ZERO, |sum, expense| add(sum, expense.amount()))
}

/// Serializes a `Decimal` as a JSON number.
struct Float(Decimal);

impl Serialize for Float {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCategory {
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Totals over the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
    /// The total of the calendar month that contains "today".
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_total: Decimal,
    pub category_summary: CategoryTotals,
    pub top_category: Option<TopCategory>,
}

impl ExpenseSummary {
    /// The percentage of the total spent in `category`, or zero if nothing was spent.
    pub fn category_share(&self, category: Category) -> Decimal {
        self.category_summary
            .get(category)
            .checked_div(self.total_expenses)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or_default()
    }
}

/// Computes the summary of `expenses`. The monthly total covers the month of `today`.
pub fn summarize(expenses: &[Expense], today: NaiveDate) -> ExpenseSummary {
    let mut total_expenses = Decimal::ZERO;
    let mut monthly_total = Decimal::ZERO;
    let mut category_summary = CategoryTotals::default();
    for expense in expenses {
        total_expenses = add(total_expenses, expense.amount());
        if is_same_month(expense.date(), today) {
            monthly_total = add(monthly_total, expense.amount());
        }
        category_summary += expense;
    }
    ExpenseSummary {
        total_expenses,
        monthly_total,
        category_summary,
        top_category: category_summary.top(),
    }
}

fn is_same_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

/// Totals of the expenses of a single vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSummary {
    pub vendor: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub transaction_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_amount: Decimal,
    pub categories: CategoryTotals,
    pub last_transaction: NaiveDate,
}

impl VendorSummary {
    fn new(expense: &Expense) -> Self {
        Self {
            vendor: expense.vendor_name().to_string(),
            total_amount: Decimal::ZERO,
            transaction_count: 0,
            average_amount: Decimal::ZERO,
            categories: CategoryTotals::default(),
            last_transaction: expense.date(),
        }
    }
}

impl ops::AddAssign<&Expense> for VendorSummary {
    fn add_assign(&mut self, expense: &Expense) {
        self.total_amount = add(self.total_amount, expense.amount());
        self.transaction_count += 1;
        self.average_amount = self
            .total_amount
            .checked_div(Decimal::from(self.transaction_count))
            .unwrap_or_default();
        self.categories += expense;
        self.last_transaction = self.last_transaction.max(expense.date());
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorStats {
    /// Number of distinct vendors. Expenses without a vendor count as one vendor.
    pub total_vendors: usize,
    pub top_vendor: Option<VendorSummary>,
    /// Sorted by total amount, largest first.
    pub vendor_summaries: Vec<VendorSummary>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
}

/// Groups `expenses` by vendor and computes per-vendor totals.
pub fn vendor_stats(expenses: &[Expense]) -> VendorStats {
    if expenses.is_empty() {
        return VendorStats::default();
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<VendorSummary> = Vec::new();
    for expense in expenses {
        let i = *index.entry(expense.vendor_name()).or_insert_with(|| {
            summaries.push(VendorSummary::new(expense));
            summaries.len() - 1
        });
        summaries[i] += expense;
    }

    // Stable, so equal totals keep first-appearance order.
    summaries.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));

    VendorStats {
        total_vendors: summaries.len(),
        top_vendor: summaries.first().cloned(),
        total_spent: summaries
            .iter()
            .fold(Decimal::ZERO, |sum, s| add(sum, s.total_amount)),
        vendor_summaries: summaries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewExpense;
    use chrono::Utc;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn expense(amount: &str, category: Category, vendor: Option<&str>, date: NaiveDate) -> Expense {
        Expense::new(
            uuid::Uuid::new_v4().to_string(),
            NewExpense {
                amount: dec(amount),
                category,
                description: "something".to_string(),
                vendor: vendor.map(str::to_string),
                date,
            },
            Utc::now(),
        )
    }

    fn scenario() -> Vec<Expense> {
        vec![
            expense("25.50", Category::Food, Some("Cafe Central"), date(2023, 12, 25)),
            expense("30.00", Category::Food, Some("Cafe Central"), date(2023, 12, 26)),
            expense("15.00", Category::Transportation, Some("Public Transit"), date(2023, 12, 25)),
        ]
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[], date(2024, 1, 15));
        assert_eq!(summary.total_expenses, Decimal::ZERO);
        assert_eq!(summary.monthly_total, Decimal::ZERO);
        assert!(summary.category_summary.iter().all(|(_, a)| a.is_zero()));
        assert_eq!(summary.category_summary.iter().count(), 6);
        assert_eq!(summary.top_category, None);
        assert_eq!(summary.category_share(Category::Food), Decimal::ZERO);
    }

    #[test]
    fn test_summarize() {
        let mut expenses = scenario();
        expenses.push(expense("100", Category::Bills, None, date(2024, 1, 3)));
        let summary = summarize(&expenses, date(2023, 12, 31));

        assert_eq!(summary.total_expenses, dec("170.50"));
        assert_eq!(summary.monthly_total, dec("70.50"));
        assert_eq!(summary.category_summary.get(Category::Food), dec("55.50"));
        assert_eq!(summary.category_summary.get(Category::Transportation), dec("15"));
        assert_eq!(summary.category_summary.get(Category::Bills), dec("100"));
        assert_eq!(summary.category_summary.get(Category::Shopping), Decimal::ZERO);
        assert_eq!(summary.category_summary.sum(), summary.total_expenses);
        assert_eq!(
            summary.top_category,
            Some(TopCategory {
                category: Category::Bills,
                amount: dec("100"),
            })
        );
    }

    #[test]
    fn test_monthly_total_uses_calendar_month() {
        let expenses = vec![
            expense("1", Category::Other, None, date(2024, 2, 1)),
            expense("2", Category::Other, None, date(2024, 2, 29)),
            expense("4", Category::Other, None, date(2024, 3, 1)),
            expense("8", Category::Other, None, date(2023, 2, 15)),
        ];
        let summary = summarize(&expenses, date(2024, 2, 10));
        assert_eq!(summary.monthly_total, dec("3"));
        assert_eq!(summary.total_expenses, dec("15"));
    }

    #[test]
    fn test_top_category_tie_goes_to_first() {
        let expenses = vec![
            expense("20", Category::Shopping, None, date(2024, 1, 1)),
            expense("20", Category::Entertainment, None, date(2024, 1, 1)),
            expense("5", Category::Food, None, date(2024, 1, 1)),
        ];
        let top = summarize(&expenses, date(2024, 1, 1)).top_category.unwrap();
        assert_eq!(top.category, Category::Entertainment);
        assert_eq!(top.amount, dec("20"));
    }

    #[test]
    fn test_category_share() {
        let summary = summarize(&scenario(), date(2023, 12, 31));
        let share = summary.category_share(Category::Transportation).round_dp(2);
        assert_eq!(share, dec("21.28"));
        assert_eq!(summary.category_share(Category::Bills), Decimal::ZERO);
    }

    #[test]
    fn test_vendor_stats_scenario() {
        let stats = vendor_stats(&scenario());
        assert_eq!(stats.total_vendors, 2);
        assert_eq!(stats.total_spent, dec("70.50"));

        let top = stats.top_vendor.as_ref().unwrap();
        assert_eq!(top.vendor, "Cafe Central");
        assert_eq!(top.total_amount, dec("55.50"));
        assert_eq!(top.transaction_count, 2);
        assert_eq!(top.average_amount, dec("27.75"));
        assert_eq!(top.last_transaction, date(2023, 12, 26));
        assert_eq!(top.categories.get(Category::Food), dec("55.50"));
        assert_eq!(top.categories.get(Category::Transportation), Decimal::ZERO);

        let vendors: Vec<&str> = stats.vendor_summaries.iter().map(|v| v.vendor.as_str()).collect();
        assert_eq!(vendors, vec!["Cafe Central", "Public Transit"]);
    }

    #[test]
    fn test_vendor_stats_empty() {
        let stats = vendor_stats(&[]);
        assert_eq!(stats.total_vendors, 0);
        assert_eq!(stats.top_vendor, None);
        assert!(stats.vendor_summaries.is_empty());
        assert_eq!(stats.total_spent, Decimal::ZERO);
    }

    #[test]
    fn test_vendor_stats_unknown_bucket() {
        let expenses = vec![
            expense("10", Category::Other, None, date(2024, 1, 1)),
            expense("5", Category::Other, Some("   "), date(2024, 1, 4)),
            expense("7", Category::Food, Some("Kiosk"), date(2024, 1, 2)),
        ];
        let stats = vendor_stats(&expenses);
        assert_eq!(stats.total_vendors, 2);
        let unknown = &stats.vendor_summaries[0];
        assert_eq!(unknown.vendor, "Unknown");
        assert_eq!(unknown.transaction_count, 2);
        assert_eq!(unknown.total_amount, dec("15"));
        assert_eq!(unknown.average_amount, dec("7.5"));
        assert_eq!(unknown.last_transaction, date(2024, 1, 4));
    }

    #[test]
    fn test_vendor_stats_equal_totals_keep_first_appearance() {
        let expenses = vec![
            expense("5", Category::Food, Some("B"), date(2024, 1, 1)),
            expense("9", Category::Food, Some("C"), date(2024, 1, 1)),
            expense("5", Category::Food, Some("A"), date(2024, 1, 1)),
        ];
        let stats = vendor_stats(&expenses);
        let vendors: Vec<&str> = stats.vendor_summaries.iter().map(|v| v.vendor.as_str()).collect();
        assert_eq!(vendors, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_totals_agree() {
        let mut expenses = scenario();
        expenses.push(expense("3.33", Category::Shopping, None, date(2022, 5, 5)));
        let summary = summarize(&expenses, date(2024, 1, 1));
        let stats = vendor_stats(&expenses);
        let by_vendor: Decimal = stats.vendor_summaries.iter().map(|v| v.total_amount).sum();
        assert_eq!(by_vendor, stats.total_spent);
        assert_eq!(stats.total_spent, summary.total_expenses);
        assert_eq!(summary.category_summary.sum(), summary.total_expenses);
    }

    #[test]
    fn test_totals_clamp_instead_of_overflowing() {
        let mut largest = expense("1", Category::Food, Some("Bank"), date(2024, 1, 1));
        largest.amount = Decimal::MAX;
        let expenses = vec![
            largest,
            expense("1", Category::Food, Some("Bank"), date(2024, 1, 2)),
            expense("1", Category::Bills, Some("Bank"), date(2024, 1, 3)),
        ];

        let summary = summarize(&expenses, date(2024, 1, 15));
        assert_eq!(summary.total_expenses, Decimal::MAX);
        assert_eq!(summary.monthly_total, Decimal::MAX);
        assert_eq!(summary.category_summary.get(Category::Food), Decimal::MAX);
        assert_eq!(summary.category_summary.sum(), Decimal::MAX);
        assert_eq!(summary.top_category.unwrap().category, Category::Food);
        assert_eq!(summary.category_share(Category::Food), Decimal::ONE_HUNDRED);

        let stats = vendor_stats(&expenses);
        assert_eq!(stats.total_vendors, 1);
        assert_eq!(stats.total_spent, Decimal::MAX);
        let bank = stats.top_vendor.unwrap();
        assert_eq!(bank.transaction_count, 3);
        assert_eq!(bank.total_amount, Decimal::MAX);
        assert!(bank.average_amount > Decimal::ZERO);
    }

    #[test]
    fn test_total() {
        let expenses = scenario();
        assert_eq!(total(&expenses), dec("70.50"));
        assert_eq!(total(expenses.iter().skip(1)), dec("45"));
        assert_eq!(total(std::iter::empty()), Decimal::ZERO);
    }

    #[test]
    fn test_serialize() {
        let stats = vendor_stats(&scenario());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalVendors"], 2);
        assert_eq!(json["totalSpent"], 70.5);
        assert_eq!(json["topVendor"]["averageAmount"], 27.75);
        assert_eq!(json["topVendor"]["lastTransaction"], "2023-12-26");
        assert_eq!(json["topVendor"]["categories"]["Food"], 55.5);
        assert_eq!(json["topVendor"]["categories"]["Bills"], 0.0);

        let summary = serde_json::to_value(summarize(&[], date(2024, 1, 1))).unwrap();
        assert_eq!(summary["topCategory"], serde_json::Value::Null);
        assert_eq!(summary["categorySummary"].as_object().unwrap().len(), 6);
    }
}

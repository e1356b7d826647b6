//! Read-only reports over the whole collection.

use crate::commands::{plural, Out};
use crate::model::amount::format;
use crate::summary::{ExpenseSummary, VendorStats};
use crate::{Config, Result};
use std::fmt::Write;

/// Shows the total, the total of the current month and the totals per category.
pub fn summary(config: Config) -> Result<Out<ExpenseSummary>> {
    let store = config.open_store();
    let summary = store.summary();

    let mut message = format!(
        "Total {} over {}, this month {}",
        format(summary.total_expenses),
        plural(store.len(), "expense", "expenses"),
        format(summary.monthly_total),
    );
    for (category, total) in summary.category_summary.iter() {
        let share = summary.category_share(category).round_dp(1);
        let _ = write!(
            message,
            "\n  {:<14} {:>12}  {:>5}%",
            category.to_string(),
            format(total),
            format(share)
        );
    }
    match &summary.top_category {
        Some(top) => {
            let _ = write!(message, "\nTop category: {} ({})", top.category, format(top.amount));
        }
        None => message.push_str("\nTop category: none"),
    }
    Ok(Out::new(message, summary))
}

/// Shows the totals per vendor, largest first.
pub fn vendors(config: Config) -> Result<Out<VendorStats>> {
    let stats = config.open_store().vendor_stats();

    let mut message = format!(
        "{} spent {}",
        plural(stats.total_vendors, "vendor", "vendors"),
        format(stats.total_spent)
    );
    for vendor in &stats.vendor_summaries {
        let _ = write!(
            message,
            "\n  {:<20} {:>12}  {:>4}x  avg {:>10}  last {}",
            vendor.vendor,
            format(vendor.total_amount),
            vendor.transaction_count,
            format(vendor.average_amount),
            vendor.last_transaction,
        );
    }
    Ok(Out::new(message, stats))
}

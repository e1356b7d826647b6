use crate::args::ListArgs;
use crate::commands::{plural, Out};
use crate::model::{amount, Expense};
use crate::{sort, summary, Config, Result};
use std::fmt::Write;

/// Lists the expenses matching the given filters in the requested order, newest first unless
/// told otherwise. The message ends its header with the total of the listed expenses.
pub fn list(config: Config, args: ListArgs) -> Result<Out<Vec<Expense>>> {
    let store = config.open_store();
    let mut matching = store.filtered(&args.filters());
    sort::sort_expenses(&mut matching, args.sort(), args.order());

    let mut message = format!(
        "Showing {} of {}, total {}",
        matching.len(),
        plural(store.len(), "expense", "expenses"),
        amount::format(summary::total(matching.iter().copied())),
    );
    for expense in &matching {
        let _ = write!(message, "\n{}", line(expense));
    }
    let matching: Vec<Expense> = matching.into_iter().cloned().collect();
    Ok(Out::new(message, matching))
}

fn line(expense: &Expense) -> String {
    format!(
        "{}  {:>12}  {:<14}  {:<20}  {}  [{}]",
        expense.date(),
        amount::format(expense.amount()),
        expense.category(),
        expense.vendor_name(),
        expense.description(),
        expense.id(),
    )
}

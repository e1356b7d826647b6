use crate::args::AddArgs;
use crate::commands::{with_persisted, Out};
use crate::model::{amount, Expense, ExpenseForm};
use crate::{Config, Result};
use anyhow::{anyhow, Context};
use chrono::Local;

/// Validates the input like the expense form does and records a new expense. The date defaults
/// to today.
pub fn add(config: Config, args: AddArgs) -> Result<Out<Expense>> {
    let form = ExpenseForm {
        amount: args.amount().to_string(),
        category: args.category(),
        description: args.description().to_string(),
        vendor: args.vendor().to_string(),
        date: Some(args.date().unwrap_or_else(|| Local::now().date_naive())),
    };
    let data = form
        .validate()
        .map_err(|e| anyhow!(e))
        .context("The expense is invalid")?;

    let mut store = config.open_store();
    let (id, persisted) = store.add(data).into_parts();
    let expense = store
        .get(&id)
        .cloned()
        .context("The added expense is missing from the store")?;

    let message = format!(
        "Added {} {} at {} on {} ({id})",
        amount::format(expense.amount()),
        expense.category(),
        expense.vendor_name(),
        expense.date(),
    );
    Ok(Out::new(with_persisted(message, &persisted), expense))
}

use crate::args::UpdateArgs;
use crate::commands::{with_persisted, Out};
use crate::model::{amount, form, Expense, ExpenseUpdates};
use crate::{Config, Result};
use anyhow::{bail, ensure, Context};

/// Changes the given fields of an existing expense.
///
/// # Errors
/// - Returns an error if no field is given, or a given field is invalid.
/// - Returns an error if there is no expense with the given id.
pub fn update(config: Config, args: UpdateArgs) -> Result<Out<Expense>> {
    let updates = updates(&args)?;
    ensure!(!updates.is_empty(), "Nothing to update, give at least one field to change");

    let mut store = config.open_store();
    if store.get(args.id()).is_none() {
        bail!("There is no expense with id '{}'", args.id())
    }
    let persisted = store.update(args.id(), updates).into_parts().1;
    let expense = store
        .get(args.id())
        .cloned()
        .context("The updated expense is missing from the store")?;

    let message = format!("Updated expense {}", expense.id());
    Ok(Out::new(with_persisted(message, &persisted), expense))
}

/// Applies the same rules as the expense form to the fields that are present.
fn updates(args: &UpdateArgs) -> Result<ExpenseUpdates> {
    if let Some(value) = args.amount() {
        ensure!(value.is_positive(), "Amount must be greater than 0");
        ensure!(value.value() <= amount::max_amount(), form::AMOUNT_TOO_LARGE);
    }
    let description = args.description().map(str::trim).map(str::to_string);
    if let Some(description) = &description {
        ensure!(!description.is_empty(), "Please enter a description");
    }
    let vendor = args.vendor().map(str::trim).map(str::to_string);
    if let Some(vendor) = &vendor {
        ensure!(!vendor.is_empty(), "Please enter a vendor");
    }
    Ok(ExpenseUpdates {
        amount: args.amount().map(|a| a.value()),
        category: args.category(),
        description,
        vendor: vendor.map(Some),
        date: args.date(),
    })
}

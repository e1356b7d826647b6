//! Types that represent the core data model, such as `Expense` and `Category`.
pub mod amount;
mod category;
mod expense;
pub mod form;

pub use amount::{Amount, AmountError};
pub use category::Category;
pub use expense::{Expense, ExpenseUpdates, NewExpense, UNKNOWN_VENDOR};
pub use form::{ExpenseForm, ValidationErrors};

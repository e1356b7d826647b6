//! These structs provide the CLI interface for the expenses CLI.

use crate::filter::{CategoryFilter, ExpenseFilters};
use crate::model::{Amount, Category};
use crate::sort::{SortField, SortOrder};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for tracking personal expenses.
///
/// Record what you spend, with a category, a vendor and a date, and get totals per category,
/// per month and per vendor. Amounts are entered with a decimal comma, e.g. 15,50.
///
/// Everything is stored as JSON in a local data directory, by default $HOME/expenses/data.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the expenses home directory and initialize the configuration file.
    ///
    /// This is the first command you should run. By default the home directory is
    /// $HOME/expenses. If you want it somewhere else, pass --expenses-home or set EXPENSES_HOME.
    Init,

    /// Record a new expense.
    Add(AddArgs),

    /// Change one or more fields of an existing expense.
    Update(UpdateArgs),

    /// Delete an expense.
    Delete(DeleteArgs),

    /// List expenses, optionally narrowed down by category, vendor, date range or a search term.
    List(ListArgs),

    /// Show the total, this month's total and the totals per category.
    Summary,

    /// Show the totals per vendor.
    Vendors,

    /// Delete all stored expenses.
    Clear,
}

#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where expenses data and configuration is held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    expenses_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, expenses_home: PathBuf) -> Self {
        Self {
            log_level,
            expenses_home: expenses_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expenses_home(&self) -> &DisplayPath {
        &self.expenses_home
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The amount, with a decimal comma and at most two decimals, e.g. 15,50
    #[arg(long)]
    amount: String,

    /// One of Food, Transportation, Entertainment, Shopping, Bills, Other
    #[arg(long)]
    category: Category,

    /// What the money was spent on.
    #[arg(long)]
    description: String,

    /// Who was paid.
    #[arg(long)]
    vendor: String,

    /// The date of the expense as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl AddArgs {
    pub fn new(
        amount: impl Into<String>,
        category: Category,
        description: impl Into<String>,
        vendor: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            amount: amount.into(),
            category,
            description: description.into(),
            vendor: vendor.into(),
            date,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Args for the `expenses update` command. Only the given fields change.
#[derive(Debug, Default, Parser, Clone)]
pub struct UpdateArgs {
    /// The id of the expense to update.
    id: String,

    /// The new amount, with a decimal comma, e.g. 15,50
    #[arg(long)]
    amount: Option<Amount>,

    /// The new category.
    #[arg(long)]
    category: Option<Category>,

    /// The new description.
    #[arg(long)]
    description: Option<String>,

    /// The new vendor.
    #[arg(long)]
    vendor: Option<String>,

    /// The new date as YYYY-MM-DD.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl UpdateArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Args for the `expenses delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the expense to delete.
    id: String,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `expenses list` command. All given constraints must match.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// Only list expenses in this category.
    #[arg(long)]
    category: Option<Category>,

    /// Only list expenses from this vendor, ignoring case.
    #[arg(long)]
    vendor: Option<String>,

    /// The first day of the date range, inclusive. Requires --to.
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// The last day of the date range, inclusive. Requires --from.
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Only list expenses whose description, category, vendor or amount contains this text.
    #[arg(long)]
    search: Option<String>,

    /// What to order the listing by: date, amount or category
    #[arg(long, default_value_t = SortField::default())]
    sort: SortField,

    /// The direction of the ordering: asc or desc
    #[arg(long, default_value_t = SortOrder::default())]
    order: SortOrder,
}

impl ListArgs {
    pub fn new(filters: ExpenseFilters) -> Self {
        let category = match filters.category {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(category),
        };
        Self {
            category,
            vendor: filters.vendor,
            from: filters.date_from,
            to: filters.date_to,
            search: filters.search_query,
            ..Default::default()
        }
    }

    pub fn with_sort(mut self, sort: SortField, order: SortOrder) -> Self {
        self.sort = sort;
        self.order = order;
        self
    }

    pub fn sort(&self) -> SortField {
        self.sort
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Converts the arguments into the filters they describe.
    pub fn filters(&self) -> ExpenseFilters {
        ExpenseFilters {
            category: self.category.into(),
            vendor: self.vendor.clone(),
            date_from: self.from,
            date_to: self.to,
            search_query: self.search.clone(),
        }
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expenses-home or EXPENSES_HOME instead of relying on the \
                default expenses home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

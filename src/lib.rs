//! A personal expense tracker: records expenses with a category, vendor and date, persists them
//! to a local key-value store and derives filtered views, summaries and vendor statistics.
//!
//! The core is [`store::ExpenseStore`], which owns the collection and writes it through a
//! [`storage::Storage`] after every change. [`filter`], [`sort`] and [`summary`] compute read-only
//! views.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod filter;
pub mod model;
pub mod sort;
pub mod storage;
pub mod store;
pub mod summary;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::Error;
pub use error::Result;

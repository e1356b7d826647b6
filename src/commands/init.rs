use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the expenses home directory, the data directory and an initial `config.json`.
///
/// # Errors
/// - Returns an error if the home directory is already initialized.
/// - Returns an error if any file operations fail.
pub fn init(expenses_home: &Path) -> Result<Out<()>> {
    let config = Config::create(expenses_home)
        .context("Unable to create the expenses home directory and config")?;
    Ok(format!(
        "Successfully created the expenses directory at {}",
        config.root().display()
    )
    .into())
}

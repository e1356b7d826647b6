use crate::commands::{plural, with_persisted, Out};
use crate::{Config, Result};

/// Deletes every stored expense.
pub fn clear(config: Config) -> Result<Out<()>> {
    let mut store = config.open_store();
    let (count, persisted) = store.clear().into_parts();
    let message = format!("Deleted {}", plural(count, "expense", "expenses"));
    Ok(with_persisted(message, &persisted).into())
}

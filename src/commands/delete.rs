use crate::args::DeleteArgs;
use crate::commands::{with_persisted, Out};
use crate::model::Expense;
use crate::{Config, Result};
use anyhow::Context;

/// Deletes the expense with the given id and returns it.
///
/// # Errors
/// - Returns an error if there is no expense with the given id.
pub fn delete(config: Config, args: DeleteArgs) -> Result<Out<Expense>> {
    let mut store = config.open_store();
    let expense = store
        .get(args.id())
        .cloned()
        .with_context(|| format!("There is no expense with id '{}'", args.id()))?;
    let persisted = store.delete(args.id()).into_parts().1;
    let message = format!("Deleted expense {}", expense.id());
    Ok(Out::new(with_persisted(message, &persisted), expense))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_delete() {
        let env = TestEnv::new();
        let ids = env.insert_sample_expenses();
        let out = delete(env.config(), DeleteArgs::new(&ids[1])).unwrap();
        assert_eq!(out.structure().unwrap().id(), ids[1]);
        assert_eq!(out.message(), format!("Deleted expense {}", ids[1]));

        let store = env.config().open_store();
        let remaining: Vec<&str> = store.expenses().iter().map(|e| e.id()).collect();
        assert_eq!(remaining, vec![ids[0].as_str(), ids[2].as_str()]);
    }

    #[test]
    fn test_delete_unknown_id() {
        let env = TestEnv::new();
        env.insert_sample_expenses();
        let err = delete(env.config(), DeleteArgs::new("nope")).unwrap_err();
        assert!(err.to_string().contains("There is no expense with id 'nope'"));
        assert_eq!(env.config().open_store().len(), 3);
    }
}

use crate::cli::actions::{Action, classes, register};
use anyhow::Result;

/// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Register(args) => register::execute(args).await,
        Action::Classes(args) => classes::execute(args).await,
    }
}

pub mod classes;
pub mod register;

// Interpreter for `Action`, kept apart so this module only lists the variants.
mod run;

#[derive(Debug)]
pub enum Action {
    Register(register::Args),
    Classes(classes::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

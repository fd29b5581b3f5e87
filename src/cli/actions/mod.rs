pub mod server;

use anyhow::Result;

/// Actions the CLI can dispatch to.
#[derive(Debug)]
pub enum Action {
    Server(Box<server::Args>),
}

impl Action {
    /// Execute the action.
    ///
    /// # Errors
    /// Propagates the underlying action error.
    pub async fn execute(self) -> Result<()> {
        match self {
            Action::Server(args) => server::execute(*args).await,
        }
    }
}

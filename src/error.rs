use thiserror::Error;

use crate::config::ConfigError;
use crate::document::EditError;
use crate::env::EnvError;

/// Error carried across the UI/privileged boundary.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Env(#[from] EnvError),
}

impl ManagerError {
    /// Message shown to the user in place of the payload.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Short category label for logs and status lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ManagerError::Config(ConfigError::ParseError { .. }) => "parse",
            ManagerError::Config(_) => "io",
            ManagerError::Edit(EditError::Conflict { .. }) => "conflict",
            ManagerError::Edit(_) => "edit",
            ManagerError::Env(EnvError::Unavailable(_)) => "unavailable",
            ManagerError::Env(_) => "env",
        }
    }
}

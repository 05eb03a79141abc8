use tokio::sync::oneshot;

use crate::config::ConfigDocument;
use crate::env::EnvWriteOutcome;
use crate::error::ManagerError;

#[derive(Debug)]
pub enum IpcError {
    Disconnected,
}

impl std::fmt::Display for IpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpcError::Disconnected => write!(f, "IPC channel disconnected"),
        }
    }
}

impl std::error::Error for IpcError {}

/// Requests served by the privileged side.
///
/// Every request carries its own responder; replies are either the payload
/// or a `ManagerError` describing what went wrong.
pub enum IpcCommand {
    GetConfig {
        respond_to: oneshot::Sender<Result<ConfigDocument, ManagerError>>,
    },
    SaveConfig {
        document: ConfigDocument,
        respond_to: oneshot::Sender<Result<(), ManagerError>>,
    },
    GetEnvVar {
        name: String,
        respond_to: oneshot::Sender<String>,
    },
    SetEnvVar {
        name: String,
        value: String,
        respond_to: oneshot::Sender<Result<EnvWriteOutcome, ManagerError>>,
    },
}

use tokio::sync::mpsc;

use crate::config::ConfigStore;
use crate::env::{get_variable, EnvError, EnvWriter};
use crate::error::ManagerError;

use super::types::IpcCommand;

/// Privileged side: owns filesystem and environment access.
pub struct IpcServer {
    pub(crate) receiver: mpsc::Receiver<IpcCommand>,
}

impl IpcServer {
    pub fn new(receiver: mpsc::Receiver<IpcCommand>) -> Self {
        Self { receiver }
    }

    /// Serve requests until every client is dropped.
    ///
    /// `env_writer` is `None` when no persistence mechanism was found; env
    /// writes then fail with `EnvError::Unavailable`.
    pub async fn run(mut self, store: ConfigStore, env_writer: Option<EnvWriter>) {
        while let Some(command) = self.receiver.recv().await {
            match command {
                IpcCommand::GetConfig { respond_to } => {
                    let result = store.load().map_err(ManagerError::from);
                    if let Err(err) = &result {
                        tracing::error!(target: "ipc", error = %err, "get-config failed");
                    }
                    if respond_to.send(result).is_err() {
                        tracing::trace!("IPC: GetConfig response dropped (receiver gone)");
                    }
                }
                IpcCommand::SaveConfig {
                    document,
                    respond_to,
                } => {
                    let result = store.save(&document).map_err(ManagerError::from);
                    if let Err(err) = &result {
                        tracing::error!(target: "ipc", error = %err, "save-config failed");
                    }
                    if respond_to.send(result).is_err() {
                        tracing::trace!("IPC: SaveConfig response dropped (receiver gone)");
                    }
                }
                IpcCommand::GetEnvVar { name, respond_to } => {
                    if respond_to.send(get_variable(&name)).is_err() {
                        tracing::trace!("IPC: GetEnvVar response dropped (receiver gone)");
                    }
                }
                IpcCommand::SetEnvVar {
                    name,
                    value,
                    respond_to,
                } => {
                    let result = match &env_writer {
                        Some(writer) => writer.set_variable(&name, &value),
                        None => Err(EnvError::Unavailable(
                            "home directory not found".to_string(),
                        )),
                    }
                    .map_err(ManagerError::from);
                    if let Err(err) = &result {
                        tracing::error!(target: "ipc", error = %err, "set-env-var failed");
                    }
                    if respond_to.send(result).is_err() {
                        tracing::trace!("IPC: SetEnvVar response dropped (receiver gone)");
                    }
                }
            }
        }
    }
}

use tokio::sync::{mpsc, oneshot};

use crate::config::ConfigDocument;
use crate::env::EnvWriteOutcome;
use crate::error::ManagerError;

use super::types::{IpcCommand, IpcError};

/// UI-side handle for the privileged operations.
///
/// Calls have no timeout: a hung filesystem write keeps the caller waiting.
#[derive(Clone)]
pub struct IpcClient {
    sender: mpsc::Sender<IpcCommand>,
}

impl IpcClient {
    pub fn new(sender: mpsc::Sender<IpcCommand>) -> Self {
        Self { sender }
    }

    pub async fn get_config(&self) -> Result<Result<ConfigDocument, ManagerError>, IpcError> {
        let (respond_to, receiver) = oneshot::channel();
        self.send(IpcCommand::GetConfig { respond_to }).await?;
        receiver.await.map_err(|_| IpcError::Disconnected)
    }

    pub async fn save_config(
        &self,
        document: ConfigDocument,
    ) -> Result<Result<(), ManagerError>, IpcError> {
        let (respond_to, receiver) = oneshot::channel();
        self.send(IpcCommand::SaveConfig {
            document,
            respond_to,
        })
        .await?;
        receiver.await.map_err(|_| IpcError::Disconnected)
    }

    pub async fn get_env_var(&self, name: String) -> Result<String, IpcError> {
        let (respond_to, receiver) = oneshot::channel();
        self.send(IpcCommand::GetEnvVar { name, respond_to }).await?;
        receiver.await.map_err(|_| IpcError::Disconnected)
    }

    pub async fn set_env_var(
        &self,
        name: String,
        value: String,
    ) -> Result<Result<EnvWriteOutcome, ManagerError>, IpcError> {
        let (respond_to, receiver) = oneshot::channel();
        self.send(IpcCommand::SetEnvVar {
            name,
            value,
            respond_to,
        })
        .await?;
        receiver.await.map_err(|_| IpcError::Disconnected)
    }

    async fn send(&self, command: IpcCommand) -> Result<(), IpcError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| IpcError::Disconnected)
    }
}

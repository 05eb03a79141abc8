//! Request/response boundary between the UI and the privileged side.
//!
//! Mirrors the four remote operations of the editor: `get_config`,
//! `save_config`, `get_env_var` and `set_env_var`.

mod client;
mod server;
mod types;

#[cfg(test)]
mod tests;

use tokio::sync::mpsc;

pub use client::IpcClient;
pub use server::IpcServer;
pub use types::{IpcCommand, IpcError};

const IPC_BUFFER: usize = 16;

pub struct IpcLayer;

impl IpcLayer {
    pub fn new() -> (IpcClient, IpcServer) {
        let (sender, receiver) = mpsc::channel(IPC_BUFFER);
        (IpcClient::new(sender), IpcServer::new(receiver))
    }
}

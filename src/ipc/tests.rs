use super::*;
use crate::config::{ConfigDocument, ConfigStore};
use crate::document::add_provider;
use crate::env::{EnvWriter, Platform};
use crate::error::ManagerError;
use std::fs;
use tempfile::TempDir;

fn spawn_server(dir: &TempDir, env_writer: Option<EnvWriter>) -> (IpcClient, tokio::task::JoinHandle<()>) {
    let store = ConfigStore::new(dir.path().join("opencode.json"));
    let (client, server) = IpcLayer::new();
    let task = tokio::spawn(server.run(store, env_writer));
    (client, task)
}

#[tokio::test]
async fn ipc_get_config_creates_default() {
    let dir = TempDir::new().unwrap();
    let (client, server_task) = spawn_server(&dir, None);

    let doc = client.get_config().await.expect("ipc").expect("config");
    assert_eq!(doc, ConfigDocument::default());
    assert!(dir.path().join("opencode.json").exists());

    drop(client);
    let _ = server_task.await;
}

#[tokio::test]
async fn ipc_save_then_get_roundtrip() {
    let dir = TempDir::new().unwrap();
    let (client, server_task) = spawn_server(&dir, None);

    let (doc, _) = add_provider(&ConfigDocument::default());
    client
        .save_config(doc.clone())
        .await
        .expect("ipc")
        .expect("save");
    let loaded = client.get_config().await.expect("ipc").expect("config");
    assert_eq!(loaded, doc);

    drop(client);
    let _ = server_task.await;
}

#[tokio::test]
async fn ipc_get_config_reports_parse_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("opencode.json"), "{ broken").unwrap();
    let (client, server_task) = spawn_server(&dir, None);

    let result = client.get_config().await.expect("ipc");
    match result {
        Err(err @ ManagerError::Config(_)) => {
            assert_eq!(err.kind(), "parse");
            assert!(err.user_message().contains("opencode.json"));
        }
        other => panic!("expected config error, got {:?}", other.map(|_| ())),
    }

    drop(client);
    let _ = server_task.await;
}

#[tokio::test]
async fn ipc_set_env_var_without_writer_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let (client, server_task) = spawn_server(&dir, None);

    let result = client
        .set_env_var("OCM_IPC_UNAVAILABLE_API_KEY".to_string(), "v".to_string())
        .await
        .expect("ipc");
    assert!(matches!(result, Err(ref err) if err.kind() == "unavailable"));

    drop(client);
    let _ = server_task.await;
}

#[tokio::test]
async fn ipc_set_then_get_env_var() {
    let dir = TempDir::new().unwrap();
    let writer = EnvWriter::new(dir.path().to_path_buf(), Platform::Unix);
    let (client, server_task) = spawn_server(&dir, Some(writer));

    let outcome = client
        .set_env_var("OCM_IPC_ROUNDTRIP_API_KEY".to_string(), "secret".to_string())
        .await
        .expect("ipc")
        .expect("set");
    assert_eq!(outcome.profile_path, Some(dir.path().join(".profile")));

    let value = client
        .get_env_var("OCM_IPC_ROUNDTRIP_API_KEY".to_string())
        .await
        .expect("ipc");
    assert_eq!(value, "secret");

    drop(client);
    let _ = server_task.await;
}

#[tokio::test]
async fn ipc_disconnect_returns_error() {
    let (client, server) = IpcLayer::new();
    drop(server);
    let result = client.get_env_var("ANY".to_string()).await;
    assert!(matches!(result, Err(IpcError::Disconnected)));
}

#[tokio::test]
async fn ipc_dropped_responder_returns_disconnected() {
    let (client, mut server) = IpcLayer::new();

    // Receive the request and drop it without answering.
    let server_task = tokio::spawn(async move {
        let _ = server.receiver.recv().await;
    });

    let result = client.get_config().await;
    assert!(matches!(result, Err(IpcError::Disconnected)));

    let _ = server_task.await;
}

//! Shared fixtures for integration tests.

use opencode_manager::config::{ConfigDocument, Model, Provider};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to `opencode.json` inside a fresh temp dir.
#[allow(dead_code)]
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("opencode.json");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

/// Provider with a display name and the given model keys.
pub fn provider(name: &str, models: &[&str]) -> Provider {
    let mut provider = Provider {
        name: Some(name.to_string()),
        package_ref: Some("@ai-sdk/openai-compatible".to_string()),
        ..Provider::default()
    };
    provider.options.base_url = "https://api.example.com/v1/".to_string();
    for key in models {
        provider.models.insert(
            key.to_string(),
            Model {
                name: Some(key.rsplit('/').next().unwrap_or(key).to_string()),
                ..Model::default()
            },
        );
    }
    provider
}

/// Document with two providers: `acme` (two models) and `zeta` (none).
pub fn sample_document() -> ConfigDocument {
    let mut doc = ConfigDocument::default();
    doc.providers.insert(
        "acme".to_string(),
        provider("Acme Cloud", &["acme/fast-1", "acme/smart-2"]),
    );
    doc.providers.insert("zeta".to_string(), provider("Zeta", &[]));
    doc
}

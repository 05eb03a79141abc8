use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::config::types::ConfigDocument;

/// A comma followed (modulo whitespace) by a closing brace or bracket.
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").expect("trailing comma pattern"));

/// Errors that can occur when loading or saving the configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create config directory '{path}': {source}")]
    CreateDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[source] serde_json::Error),
}

/// Remove commas that directly precede a closing `}` or `]`.
pub fn strip_trailing_commas(raw: &str) -> String {
    TRAILING_COMMA.replace_all(raw, "$1").into_owned()
}

/// Parse document text, tolerating trailing commas.
pub fn parse_document(raw: &str) -> Result<ConfigDocument, serde_json::Error> {
    serde_json::from_str(&strip_trailing_commas(raw))
}

/// Serialize a document with 4-space indentation.
pub fn serialize_document(doc: &ConfigDocument) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    serde::Serialize::serialize(doc, &mut serializer)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

impl ConfigDocument {
    /// Returns the default location of the opencode config file.
    ///
    /// Uses `~/.config/opencode/opencode.json` on every platform, matching
    /// where opencode itself looks. Falls back to the current directory if
    /// the home directory is unavailable.
    pub fn config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("opencode").join("opencode.json")
    }

    /// Loads the document from `path`.
    ///
    /// - If the file doesn't exist, writes `ConfigDocument::default()` there
    ///   (creating parent directories) and returns it.
    /// - Otherwise parses it leniently; a missing `provider` table becomes empty.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let doc = ConfigDocument::default();
            doc.save_to(path)?;
            tracing::info!(target: "config", path = %path.display(), "created default config");
            return Ok(doc);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let doc = parse_document(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(
            target: "config",
            path = %path.display(),
            providers = doc.providers.len(),
            "loaded config"
        );
        Ok(doc)
    }

    /// Writes the whole document to `path`, replacing any previous content.
    ///
    /// No lock and no temp-file swap: the last writer wins.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDirError {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let content = serialize_document(self).map_err(ConfigError::SerializeError)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(target: "config", path = %path.display(), "saved config");
        Ok(())
    }
}

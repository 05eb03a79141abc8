//! Path-bound access to the configuration file.
//!
//! The store never keeps a copy of the document: every `load` reads the
//! file and every `save` writes the value it is handed. The single live
//! document belongs to the UI layer.

use std::path::{Path, PathBuf};

use crate::config::loader::ConfigError;
use crate::config::types::ConfigDocument;

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store for the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store for the default `~/.config/opencode/opencode.json`.
    pub fn at_default_path() -> Self {
        Self::new(ConfigDocument::config_path())
    }

    /// Read the document, creating a default file when none exists.
    pub fn load(&self) -> Result<ConfigDocument, ConfigError> {
        ConfigDocument::load_from(&self.path)
    }

    /// Overwrite the file with `doc`.
    pub fn save(&self, doc: &ConfigDocument) -> Result<(), ConfigError> {
        doc.save_to(&self.path)
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

use std::path::PathBuf;

use crate::config::ConfigDocument;
use crate::ui::mvi::UiState;

/// Lifecycle of the editor screen: loading, loaded, or a blocking error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Loading,
    Failed {
        message: String,
    },
    Ready(Workspace),
}

impl UiState for EditorState {}

/// Everything shown while a document is loaded.
///
/// The workspace holds the single authoritative copy of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub document: ConfigDocument,
    /// Key of the provider shown in the form.
    pub selected: Option<String>,
    pub pane: Pane,
    pub field: FormField,
    pub edit: Option<TextEdit>,
    /// Waiting for y/n before deleting the selected provider.
    pub confirm_delete: bool,
    pub status: Option<Status>,
    /// Bumped on every document change; drives auto-save.
    pub revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Sidebar,
    Form,
}

/// Focusable rows of the provider form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ProviderKey,
    Name,
    Adapter,
    BaseUrl,
    ApiKey,
    Model(usize),
}

/// What an in-progress text edit will change on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    ProviderKey,
    Name,
    BaseUrl,
    /// Value for the provider's API-key variable; never stored in the document.
    ApiKey,
    ModelKey(String),
    ModelName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub target: EditTarget,
    pub buffer: String,
}

/// Transient message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Saved,
    SaveFailed(String),
    Reloaded,
    KeyExists,
    EditRejected(String),
    EnvVarSaved {
        name: String,
        profile: Option<PathBuf>,
    },
    EnvVarFailed(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Status::SaveFailed(_)
                | Status::KeyExists
                | Status::EditRejected(_)
                | Status::EnvVarFailed(_)
        )
    }
}

impl Workspace {
    pub fn new(document: ConfigDocument) -> Self {
        let selected = document.providers.keys().next().cloned();
        Self {
            document,
            selected,
            pane: Pane::Sidebar,
            field: FormField::Name,
            edit: None,
            confirm_delete: false,
            status: None,
            revision: 0,
        }
    }

    /// Form rows for the selected provider.
    pub fn form_fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::ProviderKey,
            FormField::Name,
            FormField::Adapter,
            FormField::BaseUrl,
            FormField::ApiKey,
        ];
        let models = self
            .selected
            .as_deref()
            .and_then(|key| self.document.provider(key))
            .map(|provider| provider.models.len())
            .unwrap_or(0);
        fields.extend((0..models).map(FormField::Model));
        fields
    }

    /// Key of the model at `index` in the selected provider.
    pub fn model_key_at(&self, index: usize) -> Option<&str> {
        let provider = self.document.provider(self.selected.as_deref()?)?;
        provider
            .models
            .get_index(index)
            .map(|(key, _)| key.as_str())
    }
}

impl EditorState {
    pub fn workspace(&self) -> Option<&Workspace> {
        match self {
            EditorState::Ready(workspace) => Some(workspace),
            _ => None,
        }
    }

    pub fn document(&self) -> Option<&ConfigDocument> {
        self.workspace().map(|workspace| &workspace.document)
    }

    pub fn revision(&self) -> u64 {
        self.workspace().map(|w| w.revision).unwrap_or(0)
    }

    pub fn is_editing(&self) -> bool {
        self.workspace().is_some_and(|w| w.edit.is_some())
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.workspace().is_some_and(|w| w.confirm_delete)
    }
}

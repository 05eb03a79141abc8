use crate::autosave::SaveScheduler;
use crate::config::ConfigDocument;
use crate::document::{apply_api_key_convention, provider_env_var};
use crate::ui::editor::{EditTarget, EditorIntent, EditorReducer, EditorState, Status};
use crate::ui::i18n::{Lang, Strings};
use crate::ui::mvi::Reducer;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How long a status message stays in the footer.
pub const STATUS_TTL: Duration = Duration::from_secs(2);

/// Requests from the UI to the privileged side.
#[derive(Debug)]
pub enum UiCommand {
    LoadConfig,
    SaveConfig { document: ConfigDocument },
    GetEnvVar { name: String },
    SetEnvVar { name: String, value: String },
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Whether the selected provider's API-key variable currently has a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvProbe {
    pub name: String,
    /// `None` until the privileged side has answered.
    pub is_set: Option<bool>,
}

pub struct App {
    should_quit: bool,
    lang: Lang,
    /// Editor state (MVI pattern). Holds the only live copy of the document.
    editor: EditorState,
    ipc_sender: Option<UiCommandSender>,
    autosave: Option<SaveScheduler>,
    status_since: Option<Instant>,
    env_probe: Option<EnvProbe>,
    reload_pending: bool,
    last_ipc_error: Option<String>,
}

impl App {
    pub fn new(lang: Lang) -> Self {
        Self {
            should_quit: false,
            lang,
            editor: EditorState::default(),
            ipc_sender: None,
            autosave: None,
            status_since: None,
            env_probe: None,
            reload_pending: false,
            last_ipc_error: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn strings(&self) -> &'static Strings {
        self.lang.strings()
    }

    pub fn toggle_lang(&mut self) {
        self.lang = self.lang.toggled();
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn env_probe(&self) -> Option<&EnvProbe> {
        self.env_probe.as_ref()
    }

    pub fn last_ipc_error(&self) -> Option<&str> {
        self.last_ipc_error.as_deref()
    }

    pub fn set_ipc_sender(&mut self, sender: UiCommandSender) {
        self.ipc_sender = Some(sender);
    }

    /// Route document changes through a debounced scheduler.
    ///
    /// Without one, every change is sent to the privileged side immediately.
    pub fn set_autosave(&mut self, scheduler: SaveScheduler) {
        self.autosave = Some(scheduler);
    }

    /// Dispatch an intent to the editor reducer.
    ///
    /// Side effects follow from the state change: a bumped revision schedules
    /// a save, a committed API-key edit goes to the environment writer, and a
    /// new selection re-probes its variable.
    pub fn dispatch(&mut self, intent: EditorIntent) {
        let revision_before = self.editor.revision();
        let status_before = self.current_status().cloned();
        let sets_status = matches!(intent, EditorIntent::SetStatus(_));
        let api_key = if matches!(intent, EditorIntent::CommitEdit) {
            self.pending_api_key()
        } else {
            None
        };

        dispatch_mvi!(self, editor, EditorReducer, intent);

        if let Some((name, value)) = api_key {
            self.send_command(UiCommand::SetEnvVar { name, value });
        }
        if self.editor.revision() > revision_before {
            self.schedule_save();
        }
        let (has_status, status_changed) = {
            let after = self.current_status();
            (after.is_some(), after != status_before.as_ref())
        };
        if !has_status {
            self.status_since = None;
        } else if sets_status || status_changed {
            self.status_since = Some(Instant::now());
        }
        self.refresh_env_probe();
    }

    pub fn on_tick(&mut self) {
        self.clear_expired_status(Instant::now());
    }

    /// Drop the footer status once it has been visible for `STATUS_TTL`.
    pub fn clear_expired_status(&mut self, now: Instant) {
        let Some(since) = self.status_since else {
            return;
        };
        if now.saturating_duration_since(since) >= STATUS_TTL {
            self.dispatch(EditorIntent::ClearStatus);
        }
    }

    /// Ask the privileged side for the document. Used once at startup.
    pub fn request_config_load(&mut self) {
        self.send_command(UiCommand::LoadConfig);
    }

    /// Discard pending changes and load the document from disk again.
    pub fn reload(&mut self) {
        if let Some(autosave) = &self.autosave {
            autosave.cancel();
        }
        self.reload_pending = true;
        self.dispatch(EditorIntent::Reload);
        self.request_config_load();
    }

    /// Write the current document now instead of waiting for quiescence.
    pub fn save_now(&mut self) {
        let Some(document) = self.editor.document().cloned() else {
            return;
        };
        match &self.autosave {
            Some(autosave) => {
                autosave.schedule(document);
                autosave.flush();
            }
            None => {
                let document = apply_api_key_convention(&document);
                self.send_command(UiCommand::SaveConfig { document });
            }
        }
    }

    pub fn on_config_loaded(&mut self, result: Result<ConfigDocument, String>) {
        let reloaded = std::mem::take(&mut self.reload_pending);
        match result {
            Ok(document) => {
                tracing::info!(
                    target: "ui",
                    providers = document.providers.len(),
                    "config loaded"
                );
                self.dispatch(EditorIntent::Loaded { document });
                if reloaded {
                    self.dispatch(EditorIntent::SetStatus(Status::Reloaded));
                }
            }
            Err(message) => {
                tracing::error!(target: "ui", error = %message, "config load failed");
                self.dispatch(EditorIntent::LoadFailed { message });
            }
        }
    }

    pub fn on_save_finished(&mut self, result: Result<(), String>) {
        let status = match result {
            Ok(()) => Status::Saved,
            // The in-memory document stays authoritative; no rollback or retry.
            Err(message) => Status::SaveFailed(message),
        };
        self.dispatch(EditorIntent::SetStatus(status));
    }

    pub fn on_env_var_read(&mut self, name: &str, value: &str) {
        if let Some(probe) = self.env_probe.as_mut() {
            if probe.name == name {
                probe.is_set = Some(!value.is_empty());
            }
        }
    }

    pub fn on_env_var_written(&mut self, name: String, result: Result<Option<PathBuf>, String>) {
        let status = match result {
            Ok(profile) => {
                if let Some(probe) = self.env_probe.as_mut() {
                    if probe.name == name {
                        probe.is_set = Some(true);
                    }
                }
                Status::EnvVarSaved { name, profile }
            }
            Err(message) => Status::EnvVarFailed(message),
        };
        self.dispatch(EditorIntent::SetStatus(status));
    }

    fn current_status(&self) -> Option<&Status> {
        self.editor.workspace().and_then(|ws| ws.status.as_ref())
    }

    /// Name and value for `setEnvVar` when the open edit is the API-key field.
    fn pending_api_key(&self) -> Option<(String, String)> {
        let workspace = self.editor.workspace()?;
        let edit = workspace.edit.as_ref()?;
        if edit.target != EditTarget::ApiKey || edit.buffer.trim().is_empty() {
            return None;
        }
        let name = provider_env_var(&workspace.document, workspace.selected.as_deref()?)?;
        Some((name, edit.buffer.trim().to_string()))
    }

    fn schedule_save(&mut self) {
        let Some(document) = self.editor.document().cloned() else {
            return;
        };
        match &self.autosave {
            Some(autosave) => autosave.schedule(document),
            None => {
                let document = apply_api_key_convention(&document);
                self.send_command(UiCommand::SaveConfig { document });
            }
        }
    }

    fn refresh_env_probe(&mut self) {
        let name = self
            .editor
            .workspace()
            .and_then(|ws| provider_env_var(&ws.document, ws.selected.as_deref()?));
        match name {
            Some(name) => {
                if self.env_probe.as_ref().is_some_and(|probe| probe.name == name) {
                    return;
                }
                self.env_probe = Some(EnvProbe {
                    name: name.clone(),
                    is_set: None,
                });
                self.send_command(UiCommand::GetEnvVar { name });
            }
            None => self.env_probe = None,
        }
    }

    fn send_command(&mut self, command: UiCommand) -> bool {
        let Some(sender) = &self.ipc_sender else {
            return false;
        };

        match sender.try_send(command) {
            Ok(()) => {
                self.last_ipc_error = None;
                true
            }
            Err(err) => {
                tracing::warn!(target: "ui", error = %err, "IPC send failed");
                self.last_ipc_error = Some(format!("IPC send failed: {}", err));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;

    fn make_app() -> (App, mpsc::Receiver<UiCommand>) {
        let mut app = App::new(Lang::En);
        let (tx, rx) = mpsc::channel(32);
        app.set_ipc_sender(tx);
        (app, rx)
    }

    fn sample_document() -> ConfigDocument {
        let mut doc = ConfigDocument::default();
        doc.providers.insert(
            "acme".to_string(),
            Provider {
                name: Some("Acme Cloud".to_string()),
                ..Provider::default()
            },
        );
        doc
    }

    fn drain(rx: &mut mpsc::Receiver<UiCommand>) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = rx.try_recv() {
            commands.push(command);
        }
        commands
    }

    #[test]
    fn loading_probes_selected_provider_variable() {
        let (mut app, mut rx) = make_app();
        app.on_config_loaded(Ok(sample_document()));

        let commands = drain(&mut rx);
        assert!(matches!(
            commands.as_slice(),
            [UiCommand::GetEnvVar { name }] if name == "ACME_CLOUD_API_KEY"
        ));
        assert_eq!(app.env_probe().map(|p| p.is_set), Some(None));

        app.on_env_var_read("ACME_CLOUD_API_KEY", "sk-1");
        assert_eq!(app.env_probe().and_then(|p| p.is_set), Some(true));
    }

    #[test]
    fn load_does_not_schedule_a_save() {
        let (mut app, mut rx) = make_app();
        app.on_config_loaded(Ok(sample_document()));
        assert!(!drain(&mut rx)
            .iter()
            .any(|c| matches!(c, UiCommand::SaveConfig { .. })));
    }

    #[test]
    fn document_change_sends_normalized_save() {
        let (mut app, mut rx) = make_app();
        app.on_config_loaded(Ok(sample_document()));
        drain(&mut rx);

        app.dispatch(EditorIntent::AddProvider);

        let saved = drain(&mut rx).into_iter().find_map(|c| match c {
            UiCommand::SaveConfig { document } => Some(document),
            _ => None,
        });
        let saved = saved.expect("save command");
        assert_eq!(saved.providers.len(), 2);
        assert_eq!(
            saved.providers["acme"].options.api_key.as_deref(),
            Some("{env:ACME_CLOUD_API_KEY}")
        );
    }

    #[test]
    fn api_key_commit_goes_to_env_writer_not_document() {
        let (mut app, mut rx) = make_app();
        app.on_config_loaded(Ok(sample_document()));
        app.dispatch(EditorIntent::SwitchPane);
        app.dispatch(EditorIntent::MoveDown);
        app.dispatch(EditorIntent::MoveDown);
        app.dispatch(EditorIntent::MoveDown);
        drain(&mut rx);

        app.dispatch(EditorIntent::BeginEdit);
        for ch in "sk-secret".chars() {
            app.dispatch(EditorIntent::Input(ch));
        }
        app.dispatch(EditorIntent::CommitEdit);

        let commands = drain(&mut rx);
        assert!(matches!(
            commands.as_slice(),
            [UiCommand::SetEnvVar { name, value }]
                if name == "ACME_CLOUD_API_KEY" && value == "sk-secret"
        ));
        assert_eq!(app.editor().revision(), 0);
    }

    #[test]
    fn status_clears_after_ttl() {
        let (mut app, _rx) = make_app();
        app.on_config_loaded(Ok(sample_document()));
        app.on_save_finished(Ok(()));
        let shown = app.editor().workspace().and_then(|w| w.status.clone());
        assert_eq!(shown, Some(Status::Saved));

        app.clear_expired_status(Instant::now());
        assert!(app.editor().workspace().and_then(|w| w.status.as_ref()).is_some());

        app.clear_expired_status(Instant::now() + STATUS_TTL);
        assert!(app.editor().workspace().and_then(|w| w.status.as_ref()).is_none());
    }

    #[test]
    fn save_failure_keeps_document() {
        let (mut app, _rx) = make_app();
        app.on_config_loaded(Ok(sample_document()));
        app.dispatch(EditorIntent::AddProvider);
        app.on_save_finished(Err("disk full".to_string()));

        let workspace = app.editor().workspace().expect("ready");
        assert_eq!(workspace.document.providers.len(), 2);
        assert_eq!(
            workspace.status,
            Some(Status::SaveFailed("disk full".to_string()))
        );
    }

    #[test]
    fn reload_shows_loading_then_reloaded() {
        let (mut app, mut rx) = make_app();
        app.on_config_loaded(Ok(sample_document()));
        drain(&mut rx);

        app.reload();
        assert_eq!(app.editor(), &EditorState::Loading);
        assert!(matches!(drain(&mut rx).as_slice(), [UiCommand::LoadConfig]));

        app.on_config_loaded(Ok(sample_document()));
        let status = app.editor().workspace().and_then(|w| w.status.clone());
        assert_eq!(status, Some(Status::Reloaded));
    }

    #[test]
    fn load_failure_shows_error_view() {
        let (mut app, _rx) = make_app();
        app.on_config_loaded(Err("bad json".to_string()));
        assert_eq!(
            app.editor(),
            &EditorState::Failed {
                message: "bad json".to_string()
            }
        );
    }

    #[test]
    fn send_without_sender_is_ignored() {
        let mut app = App::new(Lang::Zh);
        app.request_config_load();
        assert!(app.last_ipc_error().is_none());
        app.toggle_lang();
        assert_eq!(app.lang(), Lang::En);
    }
}

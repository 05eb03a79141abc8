mod common;

use common::sample_document;
use opencode_manager::config::{ConfigDocument, KNOWN_ADAPTERS};
use opencode_manager::ui::editor::{
    EditTarget, EditorIntent, EditorReducer, EditorState, FormField, Pane, Status, Workspace,
};
use opencode_manager::ui::mvi::Reducer;

fn make_ready() -> EditorState {
    EditorReducer::reduce(
        EditorState::Loading,
        EditorIntent::Loaded {
            document: sample_document(),
        },
    )
}

fn reduce_all(state: EditorState, intents: Vec<EditorIntent>) -> EditorState {
    intents.into_iter().fold(state, EditorReducer::reduce)
}

fn type_text(state: EditorState, text: &str) -> EditorState {
    reduce_all(state, text.chars().map(EditorIntent::Input).collect())
}

fn workspace(state: &EditorState) -> &Workspace {
    match state {
        EditorState::Ready(ws) => ws,
        other => panic!("expected Ready, got {:?}", other),
    }
}

#[test]
fn load_selects_first_provider() {
    let state = make_ready();
    let ws = workspace(&state);
    assert_eq!(ws.selected.as_deref(), Some("acme"));
    assert_eq!(ws.pane, Pane::Sidebar);
    assert_eq!(ws.revision, 0);
}

#[test]
fn load_of_empty_document_selects_nothing() {
    let state = EditorReducer::reduce(
        EditorState::Loading,
        EditorIntent::Loaded {
            document: ConfigDocument::default(),
        },
    );
    assert_eq!(workspace(&state).selected, None);
}

#[test]
fn load_failure_shows_error() {
    let state = EditorReducer::reduce(
        EditorState::Loading,
        EditorIntent::LoadFailed {
            message: "parse error".to_string(),
        },
    );
    if let EditorState::Failed { message } = &state {
        assert_eq!(message, "parse error");
    } else {
        panic!("expected Failed state");
    }
}

#[test]
fn edits_are_ignored_while_loading() {
    let state = EditorReducer::reduce(EditorState::Loading, EditorIntent::AddProvider);
    assert_eq!(state, EditorState::Loading);
}

#[test]
fn sidebar_navigation_wraps() {
    let state = make_ready();
    let state = EditorReducer::reduce(state, EditorIntent::MoveDown);
    assert_eq!(workspace(&state).selected.as_deref(), Some("zeta"));
    let state = EditorReducer::reduce(state, EditorIntent::MoveDown);
    assert_eq!(workspace(&state).selected.as_deref(), Some("acme"));
    let state = EditorReducer::reduce(state, EditorIntent::MoveUp);
    assert_eq!(workspace(&state).selected.as_deref(), Some("zeta"));
}

#[test]
fn form_navigation_reaches_models() {
    let state = reduce_all(
        make_ready(),
        vec![
            EditorIntent::SwitchPane,
            EditorIntent::MoveDown,
            EditorIntent::MoveDown,
            EditorIntent::MoveDown,
            EditorIntent::MoveDown,
        ],
    );
    assert_eq!(workspace(&state).field, FormField::Model(0));

    let state = reduce_all(state, vec![EditorIntent::MoveDown, EditorIntent::MoveDown]);
    assert_eq!(workspace(&state).field, FormField::ProviderKey);
}

#[test]
fn name_edit_commits_and_bumps_revision() {
    let state = reduce_all(
        make_ready(),
        vec![EditorIntent::SwitchPane, EditorIntent::BeginEdit],
    );
    let edit = workspace(&state).edit.clone().expect("editing");
    assert_eq!(edit.target, EditTarget::Name);
    assert_eq!(edit.buffer, "Acme Cloud");

    let state = EditorReducer::reduce(state, EditorIntent::Backspace);
    let state = type_text(state, "X");
    let state = EditorReducer::reduce(state, EditorIntent::CommitEdit);

    let ws = workspace(&state);
    assert!(ws.edit.is_none());
    assert_eq!(ws.document.providers["acme"].name.as_deref(), Some("Acme ClouX"));
    assert_eq!(ws.revision, 1);
}

#[test]
fn cancel_edit_discards_buffer() {
    let state = reduce_all(
        make_ready(),
        vec![EditorIntent::SwitchPane, EditorIntent::BeginEdit],
    );
    let state = type_text(state, "zzz");
    let state = EditorReducer::reduce(state, EditorIntent::CancelEdit);
    let ws = workspace(&state);
    assert!(ws.edit.is_none());
    assert_eq!(ws.revision, 0);
    assert_eq!(ws.document, sample_document());
}

#[test]
fn provider_key_rename_follows_selection() {
    let state = reduce_all(
        make_ready(),
        vec![
            EditorIntent::SwitchPane,
            EditorIntent::MoveUp,
            EditorIntent::BeginEdit,
        ],
    );
    let state = type_text(state, "-eu");
    let state = EditorReducer::reduce(state, EditorIntent::CommitEdit);

    let ws = workspace(&state);
    assert_eq!(ws.selected.as_deref(), Some("acme-eu"));
    let keys: Vec<&str> = ws.document.providers.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["acme-eu", "zeta"]);
}

#[test]
fn provider_key_conflict_shows_key_exists() {
    let state = reduce_all(
        make_ready(),
        vec![
            EditorIntent::SwitchPane,
            EditorIntent::MoveUp,
            EditorIntent::BeginEdit,
        ],
    );
    let state = reduce_all(state, vec![EditorIntent::Backspace; 4]);
    let state = type_text(state, "zeta");
    let state = EditorReducer::reduce(state, EditorIntent::CommitEdit);

    let ws = workspace(&state);
    assert_eq!(ws.status, Some(Status::KeyExists));
    assert_eq!(ws.selected.as_deref(), Some("acme"));
    assert_eq!(ws.revision, 0);
}

#[test]
fn model_key_edit_commits_trimmed_key() {
    let state = reduce_all(
        make_ready(),
        vec![
            EditorIntent::SwitchPane,
            EditorIntent::MoveDown,
            EditorIntent::MoveDown,
            EditorIntent::MoveDown,
            EditorIntent::MoveDown,
            EditorIntent::BeginEdit,
        ],
    );
    let edit = workspace(&state).edit.clone().expect("editing");
    assert_eq!(edit.target, EditTarget::ModelKey("acme/fast-1".to_string()));

    let state = reduce_all(state, vec![EditorIntent::Backspace; "acme/fast-1".len()]);
    let state = type_text(state, " openai/gpt-4o ");
    let state = EditorReducer::reduce(state, EditorIntent::CommitEdit);

    let models = &workspace(&state).document.providers["acme"].models;
    let keys: Vec<&str> = models.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["openai/gpt-4o", "acme/smart-2"]);
    assert_eq!(models["openai/gpt-4o"].name.as_deref(), Some("gpt-4o"));
}

#[test]
fn api_key_edit_never_touches_document() {
    let state = reduce_all(
        make_ready(),
        vec![
            EditorIntent::SwitchPane,
            EditorIntent::MoveDown,
            EditorIntent::MoveDown,
            EditorIntent::MoveDown,
            EditorIntent::BeginEdit,
        ],
    );
    let edit = workspace(&state).edit.clone().expect("editing");
    assert_eq!(edit.target, EditTarget::ApiKey);
    assert!(edit.buffer.is_empty());

    let state = type_text(state, "sk-secret");
    let state = EditorReducer::reduce(state, EditorIntent::CommitEdit);
    let ws = workspace(&state);
    assert_eq!(ws.document, sample_document());
    assert_eq!(ws.revision, 0);
}

#[test]
fn adapter_cycles_through_known_set() {
    let state = reduce_all(
        make_ready(),
        vec![
            EditorIntent::SwitchPane,
            EditorIntent::MoveDown,
            EditorIntent::BeginEdit,
        ],
    );
    let ws = workspace(&state);
    assert!(ws.edit.is_none());
    assert_eq!(
        ws.document.providers["acme"].package_ref.as_deref(),
        Some(KNOWN_ADAPTERS[1])
    );
    assert_eq!(ws.revision, 1);
}

#[test]
fn add_provider_selects_it() {
    let state = EditorReducer::reduce(make_ready(), EditorIntent::AddProvider);
    let ws = workspace(&state);
    let selected = ws.selected.as_deref().expect("selected");
    assert!(selected.starts_with("new-provider-"));
    assert_eq!(ws.pane, Pane::Form);
    assert_eq!(ws.document.providers.len(), 3);
    assert_eq!(ws.revision, 1);
}

#[test]
fn delete_needs_confirmation_then_selects_first() {
    let state = reduce_all(
        make_ready(),
        vec![EditorIntent::MoveDown, EditorIntent::RequestDeleteProvider],
    );
    assert!(state.is_confirming_delete());
    assert_eq!(workspace(&state).document.providers.len(), 2);

    let cancelled = EditorReducer::reduce(state.clone(), EditorIntent::CancelDelete);
    assert!(!cancelled.is_confirming_delete());
    assert_eq!(workspace(&cancelled).document.providers.len(), 2);

    let state = EditorReducer::reduce(state, EditorIntent::ConfirmDelete);
    let ws = workspace(&state);
    assert_eq!(ws.document.providers.len(), 1);
    assert_eq!(ws.selected.as_deref(), Some("acme"));
    assert_eq!(ws.pane, Pane::Sidebar);
}

#[test]
fn confirm_without_request_does_nothing() {
    let state = EditorReducer::reduce(make_ready(), EditorIntent::ConfirmDelete);
    assert_eq!(workspace(&state).document.providers.len(), 2);
}

#[test]
fn add_and_delete_model_keep_focus_valid() {
    let state = reduce_all(
        make_ready(),
        vec![EditorIntent::MoveDown, EditorIntent::AddModel],
    );
    let ws = workspace(&state);
    assert_eq!(ws.field, FormField::Model(0));
    assert_eq!(ws.document.providers["zeta"].models.len(), 1);

    let state = EditorReducer::reduce(state, EditorIntent::DeleteModel);
    let ws = workspace(&state);
    assert!(ws.document.providers["zeta"].models.is_empty());
    assert_eq!(ws.field, FormField::ApiKey);
    assert_eq!(ws.revision, 2);
}

#[test]
fn model_name_edit_sets_display_name() {
    let state = reduce_all(
        make_ready(),
        vec![
            EditorIntent::SwitchPane,
            EditorIntent::MoveUp,
            EditorIntent::MoveUp,
            EditorIntent::BeginModelNameEdit,
        ],
    );
    let edit = workspace(&state).edit.clone().expect("editing");
    assert_eq!(edit.target, EditTarget::ModelName("acme/smart-2".to_string()));
    assert_eq!(edit.buffer, "smart-2");

    let state = type_text(state, " v2");
    let state = EditorReducer::reduce(state, EditorIntent::CommitEdit);
    let models = &workspace(&state).document.providers["acme"].models;
    assert_eq!(models["acme/smart-2"].name.as_deref(), Some("smart-2 v2"));
}

#[test]
fn status_set_and_clear() {
    let state = EditorReducer::reduce(make_ready(), EditorIntent::SetStatus(Status::Saved));
    assert_eq!(workspace(&state).status, Some(Status::Saved));
    let state = EditorReducer::reduce(state, EditorIntent::ClearStatus);
    assert_eq!(workspace(&state).status, None);
}

#[test]
fn reload_returns_to_loading() {
    let state = EditorReducer::reduce(make_ready(), EditorIntent::Reload);
    assert_eq!(state, EditorState::Loading);
}

//! Reducer for the editor screen.
//!
//! Document changes go through the pure operations in `crate::document`;
//! the reducer only decides which one to call and what to focus next.
//! Persisting the result is the caller's job, keyed off `Workspace::revision`.

use serde_json::Value;

use crate::config::{next_adapter, ConfigDocument};
use crate::document::{
    add_model, add_provider, delete_model, delete_provider, rename_model_key,
    rename_provider_key, set_model_field, set_provider_field, set_provider_option, EditError,
    FIELD_NAME, FIELD_PACKAGE, OPTION_BASE_URL,
};
use crate::ui::editor::intent::EditorIntent;
use crate::ui::editor::state::{
    EditTarget, EditorState, FormField, Pane, Status, TextEdit, Workspace,
};
use crate::ui::mvi::Reducer;

pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = EditorState;
    type Intent = EditorIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EditorIntent::Reload => EditorState::Loading,
            EditorIntent::Loaded { document } => EditorState::Ready(Workspace::new(document)),
            EditorIntent::LoadFailed { message } => EditorState::Failed { message },
            other => match state {
                EditorState::Ready(workspace) => {
                    EditorState::Ready(reduce_workspace(workspace, other))
                }
                // Nothing to edit while loading or after a failed load.
                state => state,
            },
        }
    }
}

fn reduce_workspace(mut ws: Workspace, intent: EditorIntent) -> Workspace {
    match intent {
        EditorIntent::Reload
        | EditorIntent::Loaded { .. }
        | EditorIntent::LoadFailed { .. } => ws,
        EditorIntent::SwitchPane => {
            if ws.edit.is_some() || ws.confirm_delete {
                return ws;
            }
            ws.pane = match ws.pane {
                Pane::Sidebar if ws.selected.is_some() => Pane::Form,
                _ => Pane::Sidebar,
            };
            ws.field = clamp_field(&ws, ws.field);
            ws
        }
        EditorIntent::MoveUp => move_focus(ws, false),
        EditorIntent::MoveDown => move_focus(ws, true),
        EditorIntent::BeginEdit => begin_edit(ws),
        EditorIntent::BeginModelNameEdit => {
            if ws.pane != Pane::Form || ws.edit.is_some() {
                return ws;
            }
            if let FormField::Model(index) = ws.field {
                let name = selected_model_name(&ws, index);
                if let (Some(key), Some(name)) = (ws.model_key_at(index), name) {
                    ws.edit = Some(TextEdit {
                        target: EditTarget::ModelName(key.to_string()),
                        buffer: name,
                    });
                }
            }
            ws
        }
        EditorIntent::Input(ch) => {
            if let Some(edit) = ws.edit.as_mut() {
                edit.buffer.push(ch);
            }
            ws
        }
        EditorIntent::Backspace => {
            if let Some(edit) = ws.edit.as_mut() {
                edit.buffer.pop();
            }
            ws
        }
        EditorIntent::CommitEdit => commit_edit(ws),
        EditorIntent::CancelEdit => {
            ws.edit = None;
            ws
        }
        EditorIntent::AddProvider => {
            if ws.edit.is_some() {
                return ws;
            }
            let (document, key) = add_provider(&ws.document);
            ws = with_document(ws, document);
            ws.selected = Some(key);
            ws.pane = Pane::Form;
            ws.field = FormField::Name;
            ws.confirm_delete = false;
            ws
        }
        EditorIntent::RequestDeleteProvider => {
            if ws.selected.is_some() && ws.edit.is_none() {
                ws.confirm_delete = true;
            }
            ws
        }
        EditorIntent::ConfirmDelete => {
            if !ws.confirm_delete {
                return ws;
            }
            ws.confirm_delete = false;
            if let Some(key) = ws.selected.take() {
                let document = delete_provider(&ws.document, &key);
                ws = with_document(ws, document);
            }
            ws.selected = ws.document.providers.keys().next().cloned();
            ws.pane = Pane::Sidebar;
            ws.field = FormField::Name;
            ws
        }
        EditorIntent::CancelDelete => {
            ws.confirm_delete = false;
            ws
        }
        EditorIntent::AddModel => {
            let Some(provider_key) = ws.selected.clone() else {
                return ws;
            };
            if ws.edit.is_some() {
                return ws;
            }
            match add_model(&ws.document, &provider_key) {
                Ok((document, model_key)) => {
                    ws = with_document(ws, document);
                    let index = ws
                        .document
                        .provider(&provider_key)
                        .and_then(|provider| provider.models.get_index_of(&model_key));
                    if let Some(index) = index {
                        ws.pane = Pane::Form;
                        ws.field = FormField::Model(index);
                    }
                    ws
                }
                Err(err) => rejected(ws, err),
            }
        }
        EditorIntent::DeleteModel => {
            let (Some(provider_key), FormField::Model(index)) = (ws.selected.clone(), ws.field)
            else {
                return ws;
            };
            if ws.edit.is_some() {
                return ws;
            }
            if let Some(model_key) = ws.model_key_at(index).map(str::to_string) {
                let document = delete_model(&ws.document, &provider_key, &model_key);
                ws = with_document(ws, document);
                ws.field = clamp_field(&ws, ws.field);
            }
            ws
        }
        EditorIntent::CycleAdapter => {
            let Some(provider_key) = ws.selected.clone() else {
                return ws;
            };
            let current = ws
                .document
                .provider(&provider_key)
                .and_then(|provider| provider.package_ref.as_deref());
            let next = Value::from(next_adapter(current));
            match set_provider_field(&ws.document, &provider_key, FIELD_PACKAGE, next) {
                Ok(document) => with_document(ws, document),
                Err(err) => rejected(ws, err),
            }
        }
        EditorIntent::SetStatus(status) => {
            ws.status = Some(status);
            ws
        }
        EditorIntent::ClearStatus => {
            ws.status = None;
            ws
        }
    }
}

fn begin_edit(mut ws: Workspace) -> Workspace {
    if ws.edit.is_some() || ws.confirm_delete {
        return ws;
    }
    let Some(provider_key) = ws.selected.clone() else {
        return ws;
    };
    if ws.pane == Pane::Sidebar {
        ws.pane = Pane::Form;
        ws.field = clamp_field(&ws, ws.field);
        return ws;
    }
    let Some(provider) = ws.document.provider(&provider_key) else {
        return ws;
    };

    let edit = match ws.field {
        FormField::ProviderKey => Some(TextEdit {
            target: EditTarget::ProviderKey,
            buffer: provider_key.clone(),
        }),
        FormField::Name => Some(TextEdit {
            target: EditTarget::Name,
            buffer: provider.name.clone().unwrap_or_default(),
        }),
        FormField::Adapter => return reduce_workspace(ws, EditorIntent::CycleAdapter),
        FormField::BaseUrl => Some(TextEdit {
            target: EditTarget::BaseUrl,
            buffer: provider.options.base_url.clone(),
        }),
        FormField::ApiKey => Some(TextEdit {
            target: EditTarget::ApiKey,
            buffer: String::new(),
        }),
        FormField::Model(index) => ws.model_key_at(index).map(|key| TextEdit {
            target: EditTarget::ModelKey(key.to_string()),
            buffer: key.to_string(),
        }),
    };
    ws.edit = edit;
    ws
}

fn commit_edit(mut ws: Workspace) -> Workspace {
    let Some(edit) = ws.edit.take() else {
        return ws;
    };
    let Some(provider_key) = ws.selected.clone() else {
        return ws;
    };

    let doc = &ws.document;
    let result = match &edit.target {
        EditTarget::ProviderKey => {
            let new_key = edit.buffer.trim();
            rename_provider_key(doc, &provider_key, new_key).map(|document| {
                let selected = if document.providers.contains_key(new_key) {
                    new_key.to_string()
                } else {
                    provider_key.clone()
                };
                (document, Some(selected))
            })
        }
        EditTarget::Name => {
            set_provider_field(doc, &provider_key, FIELD_NAME, Value::String(edit.buffer))
                .map(|document| (document, None))
        }
        EditTarget::BaseUrl => {
            set_provider_option(doc, &provider_key, OPTION_BASE_URL, edit.buffer)
                .map(|document| (document, None))
        }
        // The key value goes to the environment writer, never into the document.
        EditTarget::ApiKey => return ws,
        EditTarget::ModelKey(old_key) => {
            rename_model_key(doc, &provider_key, old_key, edit.buffer.trim())
                .map(|document| (document, None))
        }
        EditTarget::ModelName(model_key) => set_model_field(
            doc,
            &provider_key,
            model_key,
            FIELD_NAME,
            Value::String(edit.buffer),
        )
        .map(|document| (document, None)),
    };

    match result {
        Ok((document, selected)) => {
            ws = with_document(ws, document);
            if let Some(selected) = selected {
                ws.selected = Some(selected);
            }
            ws
        }
        Err(err) => rejected(ws, err),
    }
}

fn move_focus(mut ws: Workspace, forward: bool) -> Workspace {
    if ws.edit.is_some() || ws.confirm_delete {
        return ws;
    }
    match ws.pane {
        Pane::Sidebar => {
            let keys: Vec<&String> = ws.document.providers.keys().collect();
            if keys.is_empty() {
                return ws;
            }
            let current = ws
                .selected
                .as_ref()
                .and_then(|selected| keys.iter().position(|key| *key == selected))
                .unwrap_or(0);
            let next = step(current, keys.len(), forward);
            ws.selected = Some(keys[next].clone());
            ws.field = clamp_field(&ws, ws.field);
        }
        Pane::Form => {
            let fields = ws.form_fields();
            let current = fields.iter().position(|f| *f == ws.field).unwrap_or(0);
            ws.field = fields[step(current, fields.len(), forward)];
        }
    }
    ws
}

fn step(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        if current + 1 >= len {
            0
        } else {
            current + 1
        }
    } else if current == 0 {
        len.saturating_sub(1)
    } else {
        current - 1
    }
}

fn clamp_field(ws: &Workspace, field: FormField) -> FormField {
    let FormField::Model(index) = field else {
        return field;
    };
    let models = ws
        .selected
        .as_deref()
        .and_then(|key| ws.document.provider(key))
        .map(|provider| provider.models.len())
        .unwrap_or(0);
    if models == 0 {
        FormField::ApiKey
    } else {
        FormField::Model(index.min(models - 1))
    }
}

fn selected_model_name(ws: &Workspace, index: usize) -> Option<String> {
    let provider = ws.document.provider(ws.selected.as_deref()?)?;
    let (_, model) = provider.models.get_index(index)?;
    Some(model.name.clone().unwrap_or_default())
}

fn with_document(mut ws: Workspace, document: ConfigDocument) -> Workspace {
    if document != ws.document {
        ws.document = document;
        ws.revision += 1;
    }
    ws
}

fn rejected(mut ws: Workspace, err: EditError) -> Workspace {
    tracing::debug!(target: "editor", error = %err, "edit rejected");
    ws.status = Some(match err {
        EditError::Conflict { .. } => Status::KeyExists,
        other => Status::EditRejected(other.to_string()),
    });
    ws
}

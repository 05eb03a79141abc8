use crate::ui::app::App;
use crate::ui::editor::{EditorIntent, EditorState, FormField, Pane};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to app actions and editor intents.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }
    if is_ctrl_char(key, 's') {
        app.save_now();
        return;
    }
    if is_ctrl_char(key, 'r') {
        app.reload();
        return;
    }

    let (editing, confirming, pane, field) = match app.editor() {
        EditorState::Ready(ws) => (ws.edit.is_some(), ws.confirm_delete, ws.pane, ws.field),
        // Loading and error views only accept quit, reload and language keys.
        EditorState::Loading | EditorState::Failed { .. } => {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
                KeyCode::Char('l') => app.toggle_lang(),
                _ => {}
            }
            return;
        }
    };

    if editing {
        let intent = match key.code {
            KeyCode::Enter => EditorIntent::CommitEdit,
            KeyCode::Esc => EditorIntent::CancelEdit,
            KeyCode::Backspace => EditorIntent::Backspace,
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                EditorIntent::Input(ch)
            }
            _ => return,
        };
        app.dispatch(intent);
        return;
    }

    if confirming {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.dispatch(EditorIntent::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.dispatch(EditorIntent::CancelDelete)
            }
            _ => {}
        }
        return;
    }

    let intent = match key.code {
        KeyCode::Char('q') => {
            app.request_quit();
            return;
        }
        KeyCode::Esc if pane == Pane::Form => EditorIntent::SwitchPane,
        KeyCode::Esc => {
            app.request_quit();
            return;
        }
        KeyCode::Char('l') => {
            app.toggle_lang();
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => EditorIntent::SwitchPane,
        KeyCode::Up | KeyCode::Char('k') => EditorIntent::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => EditorIntent::MoveDown,
        KeyCode::Enter => EditorIntent::BeginEdit,
        KeyCode::Char('a') if pane == Pane::Sidebar => EditorIntent::AddProvider,
        KeyCode::Char('a') => EditorIntent::AddModel,
        KeyCode::Char('d') | KeyCode::Delete => match (pane, field) {
            (Pane::Form, FormField::Model(_)) => EditorIntent::DeleteModel,
            _ => EditorIntent::RequestDeleteProvider,
        },
        KeyCode::Char('e') => EditorIntent::BeginModelNameEdit,
        _ => return,
    };
    app.dispatch(intent);
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

use crate::config::ConfigDocument;
use crate::ui::editor::state::Status;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum EditorIntent {
    /// A fresh load was requested; shows the loading view.
    Reload,
    Loaded { document: ConfigDocument },
    LoadFailed { message: String },

    /// Tab: move between the provider list and the form.
    SwitchPane,
    MoveUp,
    MoveDown,

    /// Enter on a form row: start a text edit (or cycle the adapter).
    BeginEdit,
    /// Start editing the display name of the focused model.
    BeginModelNameEdit,
    Input(char),
    Backspace,
    CommitEdit,
    CancelEdit,

    AddProvider,
    /// First step of provider deletion; waits for `ConfirmDelete`.
    RequestDeleteProvider,
    ConfirmDelete,
    CancelDelete,
    AddModel,
    DeleteModel,
    CycleAdapter,

    SetStatus(Status),
    ClearStatus,
}

impl Intent for EditorIntent {}

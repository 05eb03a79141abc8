mod intent;
mod reducer;
mod state;

pub use intent::EditorIntent;
pub use reducer::EditorReducer;
pub use state::{EditTarget, EditorState, FormField, Pane, Status, TextEdit, Workspace};

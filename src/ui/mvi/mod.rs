//! Model-View-Intent (MVI) primitives for the editor UI.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: everything the view needs, including the live document
//! - **Intent**: key presses and replies from the privileged side
//! - **Reducer**: pure `(State, Intent) -> State`; I/O stays with the caller

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;

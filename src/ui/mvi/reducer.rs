//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The only place where state transitions happen.
///
/// Must stay pure: `(State, Intent) -> State`. Saving, env writes and
/// timers are driven by the caller after looking at the new state.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

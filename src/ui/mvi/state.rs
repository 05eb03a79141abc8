//! Base trait for UI state.

/// Marker trait for UI state objects.
///
/// States are plain values: cloned to produce the next state and compared
/// with `PartialEq` in tests.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

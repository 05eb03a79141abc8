//! Base trait for intents.

/// Marker trait for intent objects: user edits, navigation, and results
/// coming back from the privileged side (load, save, env writes).
pub trait Intent: Send + 'static {}

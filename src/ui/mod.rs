//! Terminal UI for editing the provider configuration.

pub mod app;
pub mod editor;
pub mod events;
pub mod footer;
pub mod header;
pub mod i18n;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::{run, RuntimeOptions};

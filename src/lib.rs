pub mod autosave;
pub mod config;
pub mod document;
pub mod env;
pub mod error;
pub mod ipc;
pub mod logging;
pub mod naming;
pub mod ui;

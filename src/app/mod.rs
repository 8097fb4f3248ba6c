//! Application orchestration: state, commands, event loop plumbing, and
//! input handling.

pub mod command;
pub mod event;
pub mod handler;
pub mod runtime;
pub mod settings;
pub mod state;

//! Core logic – the analysis client, result store, and the layout math
//! behind the table, bar chart, and word cloud.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can be shared across async tasks.

pub mod bar;
pub mod client;
pub mod cloud;
pub mod export;
pub mod model;
pub mod sample;
pub mod store;
pub mod table;

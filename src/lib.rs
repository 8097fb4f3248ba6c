//! Word-frequency client: sends text to an analysis service and shows the
//! returned counts as a table, a bar chart, or a word cloud.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;

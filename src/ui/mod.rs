//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No network or file I/O happens here.

pub mod bar_view;
pub mod cloud_view;
pub mod input;
pub mod layout;
pub mod popup;
pub mod spinner;
pub mod summary;
pub mod table_view;
pub mod theme;

//! Ratatui widgets for the tabfill TUI.

pub mod help;
pub mod text_input;

//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so the form and its listeners never touch
//! crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `Esc`, `Ctrl+c`         | `Quit`                     |
//! | `F1`                    | `ToggleHelp`               |
//! | `Tab` / `Shift+Tab`     | `Key(Tab)` / `Key(BackTab)`|
//! | printable char          | `Key(Char(c))`             |
//! | `Backspace`, `Delete`   | `Key(Backspace)` / `Key(Delete)` |
//! | `←` `→` `Home` `End`    | cursor movement keys       |
//! | `Enter`                 | `Key(Enter)`               |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! Everything that reaches the form arrives as [`AppEvent::Key`]; what a key
//! does is decided by the form's listeners and default actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::str::FromStr;

/// A key press as seen by the form and its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    BackTab,
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Char(char),
}

impl Key {
    /// Whether the key's default action changes the text of a field.
    pub fn edits_text(self) -> bool {
        matches!(self, Key::Char(_) | Key::Backspace | Key::Delete)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name {0:?}")]
pub struct KeyParseError(pub String);

/// Parse a key name from the config file (`"Tab"`, `"Enter"`, `"F"`, ...).
///
/// Names are case-insensitive; a single character names itself.
impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "tab" => Ok(Key::Tab),
            "backtab" | "shift+tab" => Ok(Key::BackTab),
            "enter" | "return" => Ok(Key::Enter),
            "backspace" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),
            "space" => Ok(Key::Char(' ')),
            _ => Err(KeyParseError(s.to_string())),
        }
    }
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Show or hide the keybinding popup.
    ToggleHelp,
    /// A key for the focused field.
    Key(Key),
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, key-release events on terminals that emit them, unbound
/// keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    let emit = |k: Key| Some(AppEvent::Key(k));

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Esc => Some(AppEvent::Quit),
        F(1) => Some(AppEvent::ToggleHelp),

        Tab if key.modifiers == Mod::NONE => emit(Key::Tab),
        // Some terminals report Shift+Tab as Tab with SHIFT rather than BackTab
        BackTab => emit(Key::BackTab),
        Tab if key.modifiers == Mod::SHIFT => emit(Key::BackTab),

        // Printable characters, including shifted ones
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => emit(Key::Char(c)),

        Backspace => emit(Key::Backspace),
        Delete => emit(Key::Delete),
        Left => emit(Key::Left),
        Right => emit(Key::Right),
        Home => emit(Key::Home),
        End => emit(Key::End),
        Enter => emit(Key::Enter),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! The guess form: a focus-cycling set of single-line text fields.
//!
//! Fields are addressed by a string identifier. Key presses go to the
//! focused field's listeners first, in registration order; unless one of them
//! returns [`Propagation::PreventDefault`], the form then applies the key's
//! default action:
//!
//! | Key                    | Default action                     |
//! |------------------------|------------------------------------|
//! | `Tab` / `BackTab`      | focus next / previous field (wraps)|
//! | `Char(c)`              | insert at the cursor               |
//! | `Backspace` / `Delete` | delete before / after the cursor   |
//! | `Left` `Right` `Home` `End` | move the cursor               |
//! | `Enter`                | nothing                            |

use crate::event::Key;
use unicode_width::UnicodeWidthStr;

/// What a listener wants done with the key after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    PreventDefault,
}

/// A key listener attached to one field.
pub trait KeyListener {
    fn on_key(&mut self, field: &mut TextField, key: Key) -> Propagation;
}

// ---------------------------------------------------------------------------
// TextField
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    id: String,
    label: String,
    value: String,
    /// Byte offset of the cursor within `value`, always on a char boundary.
    cursor: usize,
}

impl TextField {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position counted in characters.
    pub fn cursor_col(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    /// Cursor position in terminal cells; wide characters take two.
    pub fn cursor_width(&self) -> usize {
        self.value[..self.cursor].width()
    }

    /// Replace the whole value and put the cursor at its end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.value[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.value.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

pub struct Form {
    fields: Vec<TextField>,
    focused: usize,
    listeners: Vec<(String, Box<dyn KeyListener>)>,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.fields)
            .field("focused", &self.focused)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Form {
    /// Build a form; the first field starts focused.
    pub fn new(fields: Vec<TextField>) -> Self {
        Self {
            fields,
            focused: 0,
            listeners: Vec::new(),
        }
    }

    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&TextField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut TextField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn focused_field(&self) -> Option<&TextField> {
        self.fields.get(self.focused)
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focused_field().map(TextField::id)
    }

    /// Move focus to the field with `id`. Returns `false` if there is none.
    pub fn focus(&mut self, id: &str) -> bool {
        match self.fields.iter().position(|f| f.id == id) {
            Some(idx) => {
                self.focused = idx;
                true
            }
            None => false,
        }
    }

    /// Attach `listener` to the field `id`. The field does not need to exist
    /// yet; callers that require it should check with [`Form::field`] first.
    pub fn add_key_listener(&mut self, id: impl Into<String>, listener: Box<dyn KeyListener>) {
        let id = id.into();
        tracing::debug!(field = %id, "key listener registered");
        self.listeners.push((id, listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver a key press to the focused field.
    pub fn key_press(&mut self, key: Key) -> Propagation {
        let Form { fields, focused, listeners } = &mut *self;
        let Some(field) = fields.get_mut(*focused) else {
            return Propagation::Continue;
        };

        let id = field.id.clone();
        let mut propagation = Propagation::Continue;
        for (_, listener) in listeners.iter_mut().filter(|(l, _)| *l == id) {
            if listener.on_key(field, key) == Propagation::PreventDefault {
                propagation = Propagation::PreventDefault;
            }
        }

        if propagation == Propagation::PreventDefault {
            tracing::debug!(field = %id, key = ?key, "default action prevented");
            return propagation;
        }

        self.default_action(key);
        Propagation::Continue
    }

    fn default_action(&mut self, key: Key) {
        let count = self.fields.len();
        if count == 0 {
            return;
        }
        match key {
            Key::Tab => {
                self.focused = (self.focused + 1) % count;
                tracing::debug!(to = ?self.focused_id(), "focus next");
            }
            Key::BackTab => {
                self.focused = (self.focused + count - 1) % count;
                tracing::debug!(to = ?self.focused_id(), "focus previous");
            }
            other => {
                let field = &mut self.fields[self.focused];
                match other {
                    Key::Char(c) => field.insert(c),
                    Key::Backspace => field.backspace(),
                    Key::Delete => field.delete(),
                    Key::Left => field.move_left(),
                    Key::Right => field.move_right(),
                    Key::Home => field.move_home(),
                    Key::End => field.move_end(),
                    Key::Enter | Key::Tab | Key::BackTab => {}
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

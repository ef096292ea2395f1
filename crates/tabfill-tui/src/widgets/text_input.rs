//! Single-line text input: a bordered box titled with the field label.
//!
//! The widget only renders; editing happens in [`crate::form::TextField`].
//! After rendering the focused input, call [`TextInput::cursor_position`] and
//! pass the result to `frame.set_cursor_position()`.

use crate::form::TextField;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct TextInput<'a> {
    field: &'a TextField,
    focused: bool,
    /// Extra text appended to the border title, e.g. `"Tab: complete"`.
    hint: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> TextInput<'a> {
    pub fn new(field: &'a TextField, focused: bool, theme: &'a Theme) -> Self {
        Self { field, focused, hint: None, theme }
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Cells scrolled off the left edge so the cursor stays inside the box.
    fn scroll_offset(&self, area: Rect) -> usize {
        let inner = usize::from(area.width.saturating_sub(2));
        self.field
            .cursor_width()
            .saturating_sub(inner.saturating_sub(1))
    }

    /// Absolute terminal position of the text cursor within `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let visible = self.field.cursor_width() - self.scroll_offset(area);
        let col = u16::try_from(visible).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(col)
            .min(area.right().saturating_sub(2));
        (x, area.y.saturating_add(1))
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = match self.hint {
            Some(hint) => format!(" {} ({hint}) ", self.field.label()),
            None => format!(" {} ", self.field.label()),
        };
        let block = Block::bordered().title(title).border_style(border_style);

        let line = if self.field.value().is_empty() && !self.focused {
            Line::from(Span::styled(
                format!("type the {}", self.field.label().to_lowercase()),
                self.theme.placeholder,
            ))
        } else {
            Line::from(self.field.value())
        };
        let offset = u16::try_from(self.scroll_offset(area)).unwrap_or(u16::MAX);
        Paragraph::new(line)
            .block(block)
            .scroll((0, offset))
            .render(area, buf);
    }
}

//! Help popup: a centred floating overlay listing all keybindings.
//!
//! Toggle with `F1`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub struct HelpPopup<'a> {
    /// Display name of the completion trigger, e.g. `"Tab"`.
    trigger: &'a str,
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(trigger: &'a str, theme: &'a Theme) -> Self {
        Self { trigger, theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(60, 11, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" tabfill keybindings (F1 to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let complete = format!("{} (artist)", self.trigger);
        let bindings: [(&str, &str); 6] = [
            (complete.as_str(), "Complete from the quiz server"),
            ("Tab  /  Shift+Tab", "Next / previous field"),
            ("← →  Home  End", "Move the cursor"),
            ("Backspace / Delete", "Delete a character"),
            ("F1", "Toggle this help popup"),
            ("Esc  /  Ctrl+c", "Quit"),
        ];

        let lines: Vec<Line> = bindings
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<22}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

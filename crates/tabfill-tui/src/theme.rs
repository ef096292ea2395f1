//! Colour theme for the tabfill TUI.
//!
//! Themes are defined as TOML files. The default theme is embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::load_default`] at startup and pass the result through
//! the application as a shared reference.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawText {
    title: RawStyle,
    placeholder: RawStyle,
    hint: RawStyle,
    busy: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    text: RawText,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border of the focused input.
    pub border_focused: Style,
    /// Border of every other input.
    pub border_unfocused: Style,
    pub title: Style,
    /// Hint text shown in an empty, unfocused input.
    pub placeholder: Style,
    /// Status line at the bottom of the screen.
    pub hint: Style,
    /// Status line segment shown while lookups are in flight.
    pub busy: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            title: raw.text.title.into_style(),
            placeholder: raw.text.placeholder.into_style(),
            hint: raw.text.hint.into_style(),
            busy: raw.text.busy.into_style(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (case-insensitive) and hex RGB `#rrggbb`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Completion results are
//! drained from the [`CompletionInbox`] once per tick, so every change to the
//! form happens on this thread.

use crate::{
    completion::{self, CompletionInbox},
    event::{self, AppEvent},
    form::{Form, TextField},
    theme::Theme,
    widgets::{help::HelpPopup, text_input::TextInput},
};
use crossterm::{
    event as ct_event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tabfill_client::CompletionService;
use tabfill_core::config::Config;
use tokio::runtime::Handle;

pub const ARTIST_FIELD: &str = "artist";
pub const TITLE_FIELD: &str = "title";

/// The quiz guess form: artist first, then song title.
pub fn guess_form() -> Form {
    Form::new(vec![
        TextField::new(ARTIST_FIELD, "Artist"),
        TextField::new(TITLE_FIELD, "Title"),
    ])
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub form: Form,
    /// `None` when the configured completion field is not on the form.
    pub inbox: Option<CompletionInbox>,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    /// Build the form and install completion on it. Lookups are spawned on
    /// `runtime`.
    pub fn new<S: CompletionService>(
        config: Config,
        theme: Theme,
        service: Arc<S>,
        runtime: Handle,
    ) -> anyhow::Result<Self> {
        let mut form = guess_form();
        let inbox = completion::install(&mut form, &config.completion, service, runtime)?;
        if inbox.is_none() {
            tracing::info!(field = %config.completion.field_id, "completion field not on form; running without completion");
        }

        Ok(App {
            state: AppState {
                form,
                inbox,
                theme,
                config,
                show_help: false,
                quit: false,
            },
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                if let Some(ev) = event::to_app_event(ct_event::read()?) {
                    tracing::debug!(focus = ?self.state.form.focused_id(), event = ?ev, "app event");
                    self.handle(ev);
                }
            }

            self.tick();
        }
        Ok(())
    }

    /// Render the whole screen into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        draw(frame, &self.state);
    }

    /// Apply any completion results that have arrived.
    pub fn tick(&mut self) -> usize {
        let s = &mut self.state;
        match s.inbox.as_mut() {
            Some(inbox) => inbox.drain(&mut s.form),
            None => 0,
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::ToggleHelp | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }
            AppEvent::ToggleHelp => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }
            AppEvent::Key(key) => {
                s.form.key_press(key);
            }
            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let fields = state.form.fields();

    // Vertical: title | one 3-line input per field | spacer | status line
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Fill(1));
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints(constraints)
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            state.config.ui.title.as_str(),
            state.theme.title,
        ))),
        rows[0],
    );

    let completion_field = state.inbox.as_ref().map(CompletionInbox::field_id);
    let hint = format!("{}: complete", state.config.completion.trigger_key);
    let focused = state.form.focused_id();
    let mut cursor = None;

    for (field, &row) in fields.iter().zip(rows[1..].iter()) {
        let is_focused = focused == Some(field.id());
        let mut input = TextInput::new(field, is_focused, &state.theme);
        if completion_field == Some(field.id()) {
            input = input.hint(&hint);
        }
        if is_focused {
            cursor = Some(input.cursor_position(row));
        }
        frame.render_widget(input, row);
    }

    let status = rows[rows.len() - 1];
    let mut spans = vec![Span::styled(" F1: help  Esc: quit", state.theme.hint)];
    let in_flight = state.inbox.as_ref().map_or(0, CompletionInbox::in_flight);
    if in_flight > 0 {
        spans.push(Span::styled(
            format!("  completing… ({in_flight})"),
            state.theme.busy,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), status);

    if state.show_help {
        frame.render_widget(
            HelpPopup::new(&state.config.completion.trigger_key, &state.theme),
            area,
        );
        return;
    }

    if let Some(pos) = cursor {
        frame.set_cursor_position(pos);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Key;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use tabfill_client::CompletionError;
    use tabfill_core::Query;

    struct Echo;

    impl CompletionService for Echo {
        async fn complete(&self, query: &Query) -> Result<Option<String>, CompletionError> {
            Ok(Some(format!("The {query}")))
        }
    }

    fn app(config: Config) -> App {
        App::new(config, Theme::load_default(), Arc::new(Echo), Handle::current()).unwrap()
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle(AppEvent::Key(Key::Char(c)));
        }
    }

    #[tokio::test]
    async fn quit_and_help() {
        let mut app = app(Config::defaults());
        app.handle(AppEvent::ToggleHelp);
        assert!(app.state().show_help);

        // Keys are swallowed while help is open.
        app.handle(AppEvent::Key(Key::Char('x')));
        assert_eq!(app.state().form.field(ARTIST_FIELD).unwrap().value(), "");

        app.handle(AppEvent::Quit);
        assert!(!app.state().show_help);
        assert!(!app.state().quit);

        app.handle(AppEvent::Quit);
        assert!(app.state().quit);
    }

    #[tokio::test]
    async fn tab_completes_artist_through_tick() {
        let mut app = app(Config::defaults());
        type_str(&mut app, "Doors");
        app.handle(AppEvent::Key(Key::Tab));
        assert_eq!(app.state().form.focused_id(), Some(ARTIST_FIELD));

        while app.tick() == 0 {
            tokio::task::yield_now().await;
        }
        let field = app.state().form.field(ARTIST_FIELD).unwrap();
        assert_eq!(field.value(), "The Doors");
        assert_eq!(field.cursor_col(), 9);
    }

    #[tokio::test]
    async fn unknown_completion_field_runs_without_completion() {
        let mut config = Config::defaults();
        config.completion.field_id = "album".to_string();
        let mut app = app(config);
        assert!(app.state().inbox.is_none());
        assert_eq!(app.state().form.listener_count(), 0);

        type_str(&mut app, "Doors");
        app.handle(AppEvent::Key(Key::Tab));
        assert_eq!(app.state().form.focused_id(), Some(TITLE_FIELD));
        assert_eq!(app.tick(), 0);
    }

    #[tokio::test]
    async fn invalid_trigger_key_fails_startup() {
        let mut config = Config::defaults();
        config.completion.trigger_key = "Hyper".to_string();
        let result = App::new(config, Theme::load_default(), Arc::new(Echo), Handle::current());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn renders_form() {
        let mut app = app(Config::defaults());
        type_str(&mut app, "Doors");

        let mut terminal = Terminal::new(TestBackend::new(50, 12)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Guess the song"));
        assert!(text.contains("Artist (Tab: complete)"));
        assert!(text.contains("Doors"));
        assert!(text.contains("type the title"));
    }
}

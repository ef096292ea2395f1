//! tabfill TUI: the guess form, its Tab-completion handler and the ratatui
//! application shell.

pub mod app;
pub mod completion;
pub mod event;
pub mod form;
pub mod theme;
pub mod widgets;

pub use app::App;

use std::sync::Arc;
use tabfill_client::CompletionService;
use tabfill_core::config::Config;
use tokio::runtime::Handle;

/// Start the TUI. Completion lookups run on `runtime`; the form itself stays
/// on the calling thread.
pub fn run<S: CompletionService>(config: Config, service: S, runtime: Handle) -> anyhow::Result<()> {
    let theme = theme::Theme::load_default();
    App::new(config, theme, Arc::new(service), runtime)?.run()
}

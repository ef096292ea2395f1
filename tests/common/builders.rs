//! Test builders: ergonomic constructors for configs and forms.
//!
//! These builders are designed for readability in tests, not for production
//! use. They panic on invalid input rather than returning `Result`.

use std::sync::Arc;
use tabfill_client::HttpCompletionClient;
use tabfill_core::config::{CompletionConfig, ServiceConfig};
use tabfill_tui::{
    app::guess_form,
    completion::{self, CompletionInbox},
    form::Form,
};

/// `[service]` section pointing at `base_url`, everything else default.
pub fn service_config(base_url: &str) -> ServiceConfig {
    ServiceConfig {
        base_url: base_url.to_string(),
        ..ServiceConfig::default()
    }
}

pub fn http_client(base_url: &str) -> HttpCompletionClient {
    HttpCompletionClient::new(&service_config(base_url)).expect("valid test service config")
}

/// The guess form with `artist` pre-filled and focused.
pub fn form_with_artist(artist: &str) -> Form {
    let mut form = guess_form();
    for c in artist.chars() {
        form.key_press(tabfill_tui::event::Key::Char(c));
    }
    form
}

/// Install completion backed by the real HTTP client on the current runtime.
pub fn install_http(form: &mut Form, base_url: &str) -> CompletionInbox {
    completion::install(
        form,
        &CompletionConfig::default(),
        Arc::new(http_client(base_url)),
        tokio::runtime::Handle::current(),
    )
    .expect("default trigger key parses")
    .expect("guess form has an artist field")
}

//! Configuration types for tabfill.
//!
//! [`Config::load`] reads `~/.config/tabfill/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[service]
base_url       = "http://127.0.0.1:5000"
endpoint       = "/autocomplete/tab_artist"
query_param    = "query"
session_cookie = ""

[completion]
field_id      = "artist"
trigger_key   = "Tab"
discard_stale = true

[ui]
title = "Guess the song"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/tabfill/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[service]` section: where the completion service lives.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Raw `Cookie` header value sent with every lookup. Empty means none.
    #[serde(default)]
    pub session_cookie: String,
}

fn default_base_url() -> String { "http://127.0.0.1:5000".to_string() }
fn default_endpoint() -> String { "/autocomplete/tab_artist".to_string() }
fn default_query_param() -> String { "query".to_string() }

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            query_param: default_query_param(),
            session_cookie: String::new(),
        }
    }
}

impl ServiceConfig {
    /// The session cookie, or `None` when unset or blank.
    pub fn cookie(&self) -> Option<&str> {
        let c = self.session_cookie.trim();
        (!c.is_empty()).then_some(c)
    }
}

/// `[completion]` section: which field is augmented and how.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_field_id")]
    pub field_id: String,
    #[serde(default = "default_trigger_key")]
    pub trigger_key: String,
    /// Drop responses superseded by a newer lookup or by an edit.
    #[serde(default = "default_discard_stale")]
    pub discard_stale: bool,
}

fn default_field_id() -> String { "artist".to_string() }
fn default_trigger_key() -> String { "Tab".to_string() }
fn default_discard_stale() -> bool { true }

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            field_id: default_field_id(),
            trigger_key: default_trigger_key(),
            discard_stale: default_discard_stale(),
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String { "Guess the song".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self { title: default_title() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/tabfill/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_or_create(&config_path())
    }

    /// Like [`Config::load_from`], but first writes the default config to
    /// `path` (creating parent directories) when nothing is there yet.
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(path)
    }

    /// Load the defaults overlaid with the file at `path`, if it exists.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("tabfill")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

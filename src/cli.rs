//! Command-line surface of the `tabfill` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabfill_client::{CompletionError, CompletionService};
use tabfill_core::{config::Config, Query};

#[derive(Debug, Parser)]
#[command(name = "tabfill", about = "Guess form with Tab completion from the quiz server")]
pub struct Cli {
    /// Write debug logs to /tmp/tabfill-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,

    /// Read configuration from this file instead of ~/.config/tabfill/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Completion service base URL, overriding the config file.
    #[arg(long, value_name = "URL", env = "TABFILL_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up one completion, print the match and exit.
    Complete {
        /// Partial text; surrounding whitespace is ignored.
        text: String,
    },
}

impl Cli {
    /// Resolve the effective configuration: file (or defaults), then flags.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(url) = &self.base_url {
            config.service.base_url = url.clone();
        }
        Ok(config)
    }
}

/// One lookup outside the TUI. Blank text issues no request.
pub async fn complete_once<S: CompletionService>(
    service: &S,
    text: &str,
) -> Result<Option<String>, CompletionError> {
    match Query::new(text) {
        Some(query) => service.complete(&query).await,
        None => {
            tracing::debug!("blank text, no lookup");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_subcommand() {
        let cli = Cli::try_parse_from(["tabfill", "--base-url", "http://localhost:9", "complete", "Doors"])
            .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9"));
        assert!(matches!(cli.command, Some(Command::Complete { ref text }) if text == "Doors"));
    }

    #[test]
    fn base_url_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            debug: false,
            config: Some(dir.path().join("absent.toml")),
            base_url: Some("http://quiz.local:8080".into()),
            command: None,
        };
        let config = cli.load_config().unwrap();
        assert_eq!(config.service.base_url, "http://quiz.local:8080");
        assert_eq!(config.service.endpoint, "/autocomplete/tab_artist");
    }
}

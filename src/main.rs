use clap::Parser;
use tabfill::cli::{self, Cli, Command};
use tabfill_client::HttpCompletionClient;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/tabfill-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("tabfill debug log started, tail -f /tmp/tabfill-debug.log");
    }

    let config = cli.load_config()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();
    let client = HttpCompletionClient::new(&config.service)?;

    match cli.command {
        Some(Command::Complete { text }) => {
            if let Some(matched) = runtime.block_on(cli::complete_once(&client, &text))? {
                println!("{matched}");
            }
            Ok(())
        }
        None => tabfill_tui::run(config, client, runtime.handle().clone()),
    }
}

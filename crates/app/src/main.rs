//! AdviceBook - Main entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advicebook_app::cli::{self, Cli};
use advicebook_app::{App, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from the working directory before reading config.
    let dotenv_failures = match std::env::current_dir() {
        Ok(cwd) => advicebook_app::config::load_dotenv(&cwd),
        Err(_) => Vec::new(),
    };

    // Logs go to stderr so command output stays clean on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advicebook=warn,advicebook_app=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    for (path, e) in &dotenv_failures {
        tracing::warn!(path = ?path, error = %e, "Failed to load env file");
    }

    let args = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(path) = args.storage.clone() {
        config = config.with_storage_path(path);
    }
    tracing::info!(storage_path = ?config.storage_path, "Starting AdviceBook");

    let app = App::from_config(&config);
    let mut stdout = std::io::stdout().lock();
    cli::run(args.command, !args.no_translate, &app, &mut stdout).await
}

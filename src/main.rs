// src/main.rs

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheetsync::cli::{self, Cli};

fn main() {
    // .env is optional; it only pre-seeds variables such as SHEETSYNC_DATA_DIR
    let dotenv_result = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv_result {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

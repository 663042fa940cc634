use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sprout::cli::{Cli, run_command};
use sprout::{Config, JsonFileStore, MatchService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sprout=info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.profiles {
        config.store.profiles_path = path;
    }
    tracing::debug!(profiles = %config.store.profiles_path.display(), "Using profile store");

    let store = Arc::new(JsonFileStore::new(&config.store.profiles_path));
    let service = MatchService::new(store, config.matching);

    let mut stdout = std::io::stdout().lock();
    run_command(&service, cli.command, &mut stdout).await
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relaybot_core::{
    load_config, validate_config, ApiSearcher, HistoryStore, JsonHistoryStore, MastodonPublisher,
    Publisher, PublisherConfig, RelayConfig, RelayCycle, Scheduler, SchedulerConfig, Searcher,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("RELAYBOT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!(
        site = %config.source.site,
        instance = %config.target.instance,
        keywords = %config.source.keywords,
        "Relaying submissions"
    );
    info!("History file: {:?}", config.history_path());

    let searcher: Arc<dyn Searcher> = Arc::new(
        ApiSearcher::new(config.source.clone()).context("Failed to create search client")?,
    );
    let history: Arc<dyn HistoryStore> = Arc::new(JsonHistoryStore::new(config.history_path()));
    let publisher: Arc<dyn Publisher> = Arc::new(
        MastodonPublisher::new(PublisherConfig::from(&config))
            .context("Failed to create publisher")?,
    );

    let cycle = Arc::new(RelayCycle::new(
        RelayConfig::from(&config),
        searcher,
        history,
        publisher,
    ));
    let scheduler = Scheduler::new(SchedulerConfig::from(&config), cycle);

    info!("Bot {} v{} was initialized", config.bot.name, VERSION);
    scheduler.start();

    shutdown_signal().await;
    info!("Shutdown signal received");

    scheduler.stop().await;
    info!("Bot {} stopped", config.bot.name);

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

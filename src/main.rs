use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cricket_scores::actions::CricketService;
use cricket_scores::api::{build_provider, Clock, SystemClock};
use cricket_scores::config::Config;
use cricket_scores::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cricket_scores=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cricket-scores");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded (provider: {:?})", config.provider);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let provider = build_provider(&config, Arc::clone(&clock));
    let service = Arc::new(CricketService::new(
        provider,
        clock,
        Duration::from_secs(config.dedupe_window),
    ));
    info!("Using {} provider", service.provider_name());

    let app = server::router(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutdown signal received");
    });

    if let Err(e) = server.await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Shutting down cricket-scores");
    Ok(())
}

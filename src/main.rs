// src/main.rs
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use bot_health::{
    config,
    health::HealthAggregator,
    probe::{BotApiClient, TcpDatastoreProbe},
    server::{RequestHandler, ServerBuilder},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bot_health=info".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    let settings = config::load_settings()
        .context("Failed to load configuration")?;
    info!(
        "Loaded configuration (probe timeout {:?})",
        settings.health.timeout()
    );

    let bot = Arc::new(settings.bot);
    let messaging = Arc::new(
        BotApiClient::new(
            settings.health.bot_api_url.clone(),
            bot.bot_token.clone(),
            settings.health.timeout(),
        )
        .context("Failed to create Bot API client")?,
    );
    let datastore = Arc::new(TcpDatastoreProbe::new(bot.mongo_db_uri.clone()));

    let aggregator = Arc::new(HealthAggregator::new(
        bot,
        messaging,
        datastore,
        settings.health.timeout(),
    ));
    let handler = RequestHandler::new(aggregator, settings.server.name);

    let addr: SocketAddr = ([0, 0, 0, 0], settings.server.port).into();
    info!("Starting health check server on {}", addr);

    ServerBuilder::new(addr)
        .with_handler(handler)
        .serve_with_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received");
}

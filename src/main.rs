//! Limit Exchange - HTTP entry point

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use limit_exchange::api::{create_router, AppState};
use limit_exchange::config::Config;
use limit_exchange::telemetry;
use limit_exchange::Exchange;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    telemetry::init_tracing(&config.log);

    let exchange = Exchange::new(config.markets(), config.order_capacity);
    info!(markets = ?exchange.markets(), "starting exchange");

    let app = create_router(AppState::new(exchange));

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

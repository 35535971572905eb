//! statusboard - platform status dashboard
//!
//! Polls the status backend for platforms, checks, results and messages, and
//! serves a rolled-up health view over HTTP.

mod config;
mod feed;
mod status;
mod web;

use config::ServerConfig;
use feed::{ApiClient, Feed, Refresher};
use web::Server;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("statusboard=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();
    tracing::info!("Starting statusboard on port {}...", cfg.http_port);
    tracing::info!("Using status API at {}", cfg.api_base_url);

    let client = Arc::new(ApiClient::new(&cfg.api_base_url, cfg.request_timeout())?);
    let feed = Arc::new(Feed::new());

    // Start refresher
    let refresher = Arc::new(Refresher::new(feed.clone(), client, cfg.refresh_interval()));
    refresher.start().await;

    // Start web server
    let server = Server::new(cfg, feed, refresher);
    server.start().await?;

    Ok(())
}

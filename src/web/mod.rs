//! Web server module.

mod handlers;
mod render;
mod view;

use crate::config::ServerConfig;
use crate::feed::{Feed, Refresher};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub feed: Arc<Feed>,
    pub refresher: Arc<Refresher>,
}

/// Web server for the status dashboard.
pub struct Server {
    state: AppState,
}

impl Server {
    pub fn new(config: ServerConfig, feed: Arc<Feed>, refresher: Arc<Refresher>) -> Self {
        Self {
            state: AppState {
                config,
                feed,
                refresher,
            },
        }
    }

    /// Build the router with all routes.
    fn routes(&self) -> Router {
        let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

        Router::new()
            // Dashboard
            .route("/", get(handlers::handle_dashboard))
            // API endpoints
            .route("/api/summary", get(handlers::handle_summary))
            .route("/api/platforms/{id}", get(handlers::handle_platform))
            .route("/api/refresh", post(handlers::handle_refresh))
            .route("/healthz", get(handlers::handle_healthz))
            // Static assets
            .route("/assets/{*path}", get(handlers::handle_asset))
            .route("/favicon.ico", get(handlers::handle_favicon))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(64 * 1024))
            .with_state(self.state.clone())
    }

    /// Start the server on the configured port and serve until Ctrl-C.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let router = self.routes();

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.state.refresher.stop().await;
        tracing::info!("Web server stopped");

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

//! HTTP request handlers.

use super::render::render_dashboard;
use super::view::DashboardView;
use super::AppState;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
};
use rust_embed::RustEmbed;
use serde::Deserialize;
use serde_json::json;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub platform: Option<String>,
}

impl DashboardQuery {
    fn selected(&self) -> Option<&str> {
        self.platform.as_deref().filter(|id| !id.is_empty())
    }
}

// ============================================================================
// Dashboard
// ============================================================================

pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let snapshot = state.feed.snapshot().await;
    let view = DashboardView::build(&snapshot, query.selected());

    Html(render_dashboard(&view))
}

// ============================================================================
// API
// ============================================================================

pub async fn handle_summary(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let snapshot = state.feed.snapshot().await;
    let view = DashboardView::build(&snapshot, query.selected());

    Json(view).into_response()
}

pub async fn handle_platform(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let snapshot = state.feed.snapshot().await;
    let view = DashboardView::build(&snapshot, Some(&id));

    match view.selected {
        Some(detail) => Json(detail).into_response(),
        None => (StatusCode::NOT_FOUND, "Platform not found").into_response(),
    }
}

pub async fn handle_refresh(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("Manual refresh requested");
    state.refresher.trigger().await;

    (StatusCode::ACCEPTED, Json(json!({"status": "refreshing"})))
}

pub async fn handle_healthz() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

// ============================================================================
// Static Assets
// ============================================================================

pub async fn handle_asset(Path(path): Path<String>) -> impl IntoResponse {
    match Assets::get(&path) {
        Some(file) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                file.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}

pub async fn handle_favicon() -> impl IntoResponse {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
        <circle cx="50" cy="50" r="45" fill="#1f7a4d"/>
        <path d="M25 52 L42 68 L75 34" stroke="white" stroke-width="8" fill="none"/>
    </svg>"##;

    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

//! HTTP server implementation using Axum.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use virta_core::config::GatewayConfig;
use virta_engine::QaEngine;

use crate::ocr::ImageTextExtractor;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    /// The QA engine — read-only corpora, shared across all requests.
    pub engine: Arc<QaEngine>,
    /// Optional OCR collaborator for image-augmented questions.
    pub ocr: Option<Arc<dyn ImageTextExtractor>>,
    /// Per-request processing deadline.
    pub request_timeout: Duration,
    pub start_time: Instant,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(super::routes::root))
        .route("/health", get(super::routes::health_check))
        .route("/api/", post(super::routes::ask))
        .route("/api/stats", get(super::routes::get_stats))
        .layer({
            let cors = CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
                .max_age(Duration::from_secs(3600));

            // Restrict CORS origins in production via env var
            // Example: VIRTA_CORS_ORIGINS=https://exam.example.edu,https://ta.example.edu
            if let Ok(origins_str) = std::env::var("VIRTA_CORS_ORIGINS") {
                let origins: Vec<_> = origins_str
                    .split(',')
                    .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
                    .collect();
                cors.allow_origin(origins)
            } else {
                // Development fallback — allow all origins
                cors.allow_origin(Any)
            }
        })
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(
    config: &GatewayConfig,
    engine: Arc<QaEngine>,
    ocr: Option<Arc<dyn ImageTextExtractor>>,
) -> anyhow::Result<()> {
    let state = AppState {
        engine,
        ocr,
        request_timeout: Duration::from_secs(config.request_timeout_secs),
        start_time: Instant::now(),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🌐 Gateway server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

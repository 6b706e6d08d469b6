pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::detection::DetectionRunner;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub runner: DetectionRunner,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let runner = DetectionRunner::new(config.debounce);
        Self {
            config: Arc::new(config),
            runner,
        }
    }
}

/// Build the full router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Grading routes
        .route("/api/grading/check", post(routes::grading::check))
        .route("/api/grading/expand", post(routes::grading::expand))
        // Similarity routes
        .route("/api/similarity/compare", post(routes::similarity::compare))
        .route("/api/similarity/score", post(routes::similarity::score))
        .route(
            "/api/similarity/variations",
            post(routes::similarity::variations),
        )
        // Duplicate routes
        .route("/api/duplicates/detect", post(routes::duplicates::detect))
        .route("/api/duplicates/smart", post(routes::duplicates::smart))
        .route("/api/duplicates/jobs", post(routes::duplicates::submit_job))
        .route("/api/duplicates/status", get(routes::duplicates::status))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = config.addr();

    tracing::info!(
        debounce_ms = config.debounce.as_millis() as u64,
        similarity_threshold = config.similarity_threshold,
        "Loaded configuration"
    );

    let app = build_router(AppState::new(config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

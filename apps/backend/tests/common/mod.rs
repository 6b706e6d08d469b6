//! Common test utilities and fixtures for integration tests.
//!
//! The service holds no external resources, so every test builds its own
//! router around a fresh `AppState`.

pub mod fixtures;

use std::time::Duration;

use axum::Router;
use axum_test::TestServer;

use vocab_trainer_backend::config::Config;
use vocab_trainer_backend::{build_router, AppState};

/// Test context holding the application state and its router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a context with default configuration and no debounce delay.
    pub fn new() -> Self {
        Self::with_config(Config {
            debounce: Duration::ZERO,
            ..Config::default()
        })
    }

    /// Create a context with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(config);
        let app = build_router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start an in-memory test server.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }
}

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod ripe_client;

use ripe_client::DirectoryProvider;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn DirectoryProvider>,
}

impl AppState {
    pub fn new(directory: Arc<dyn DirectoryProvider>) -> Self {
        Self { directory }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health))
        .route("/.well-known/mcp", get(http::handlers::discovery))
        .route("/mcp", post(http::handlers::mcp_endpoint))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}

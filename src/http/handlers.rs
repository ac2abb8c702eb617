//! Axum HTTP handlers for the web server

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;

use crate::domain::query::QUERY_RIPE_METHOD;
use crate::mcp::{rpc::JsonRpcReply, server::handle};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub mcp_endpoint: &'static str,
    pub methods: [&'static str; 1],
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn discovery() -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        mcp_endpoint: "/mcp",
        methods: [QUERY_RIPE_METHOD],
    })
}

/// Always answers 200; protocol failures travel inside the JSON-RPC body.
pub async fn mcp_endpoint(State(state): State<AppState>, body: Bytes) -> Json<JsonRpcReply> {
    Json(handle(&state, &body).await)
}

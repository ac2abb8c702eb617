//! HTTP transport layer
//!
//! Provides the external API routing: the `/mcp` JSON-RPC listener plus health and
//! discovery endpoints.

pub mod handlers;

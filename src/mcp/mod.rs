//! JSON-RPC dispatching for the `/mcp` endpoint
//!
//! Provides the response envelope types and the routing of decoded requests to
//! method handlers.

pub mod rpc;
pub mod server;

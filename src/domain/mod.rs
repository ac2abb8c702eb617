//! Method-level handling of `query_ripe` calls
//!
//! Provides parameter extraction and the bridge between the JSON-RPC dispatcher and
//! the RIPE Database adapter.

pub mod query;
pub mod utils;

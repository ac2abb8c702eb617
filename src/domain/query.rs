//! The `query_ripe` method
//!
//! Extracts `query` and `limit` from the call parameters and delegates the search to
//! the configured `DirectoryProvider`.

use serde_json::{Map, Value};

use crate::domain::utils::{normalize_limit, normalize_query};
use crate::mcp::rpc::{app_error_to_json_rpc, json_rpc_result, JsonRpcResponse};
use crate::{errors::AppError, AppState};

pub const QUERY_RIPE_METHOD: &str = "query_ripe";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRipeParams {
    pub query: String,
    pub limit: usize,
}

impl QueryRipeParams {
    pub fn from_params(params: Option<&Value>) -> Result<Self, AppError> {
        let empty = Map::new();
        let object = match params {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(object)) => object,
            Some(_) => return Err(AppError::invalid_params("params must be an object")),
        };

        Ok(Self {
            query: normalize_query(object.get("query"))?,
            limit: normalize_limit(object.get("limit"))?,
        })
    }
}

pub async fn handle_query_ripe(
    state: &AppState,
    id: Value,
    params: Option<&Value>,
) -> JsonRpcResponse {
    let params = match QueryRipeParams::from_params(params) {
        Ok(params) => params,
        Err(err) => return app_error_to_json_rpc(id, err),
    };

    let objects = match state.directory.search(&params.query, params.limit).await {
        Ok(objects) => objects,
        Err(err) => return app_error_to_json_rpc(id, err),
    };

    match serde_json::to_value(objects) {
        Ok(result) => json_rpc_result(id, result),
        Err(err) => app_error_to_json_rpc(
            id,
            AppError::internal(format!("failed to serialize directory objects: {err}")),
        ),
    }
}

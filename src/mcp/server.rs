//! Request decoding and method routing
//!
//! Every inbound body resolves to a JSON-RPC reply: undecodable bodies, unknown
//! methods and adapter failures all become error envelopes.

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::query::{handle_query_ripe, QUERY_RIPE_METHOD};
use crate::mcp::rpc::{
    json_rpc_error, JsonRpcReply, JsonRpcResponse, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::AppState;

/// Upper bound on calls per batch; each element may cost one upstream request.
pub const MAX_BATCH_SIZE: usize = 20;

pub async fn handle(state: &AppState, raw_body: &[u8]) -> JsonRpcReply {
    let payload: Value = match serde_json::from_slice(raw_body) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "request body is not valid JSON");
            return JsonRpcReply::Single(json_rpc_error(Value::Null, PARSE_ERROR, "Parse error"));
        }
    };

    match payload {
        Value::Array(batch) => {
            if batch.is_empty() || batch.len() > MAX_BATCH_SIZE {
                warn!(
                    batch_size = batch.len(),
                    max_batch_size = MAX_BATCH_SIZE,
                    "rejected batch request"
                );
                return JsonRpcReply::Single(json_rpc_error(
                    Value::Null,
                    INVALID_REQUEST,
                    "Invalid Request",
                ));
            }

            // join_all yields results in input order.
            let responses = join_all(
                batch
                    .into_iter()
                    .map(|item| handle_json_rpc_value(state, item)),
            )
            .await;
            JsonRpcReply::Batch(responses)
        }
        payload => JsonRpcReply::Single(handle_json_rpc_value(state, payload).await),
    }
}

/// `jsonrpc` is not checked; a missing `id` is answered with `null`.
pub async fn handle_json_rpc_value(state: &AppState, payload: Value) -> JsonRpcResponse {
    let Value::Object(mut request) = payload else {
        return json_rpc_error(Value::Null, INVALID_REQUEST, "Invalid Request");
    };

    let id = request.remove("id").unwrap_or(Value::Null);
    let method = request.get("method").and_then(Value::as_str);

    handle_json_rpc_request(state, id, method, request.get("params")).await
}

pub async fn handle_json_rpc_request(
    state: &AppState,
    id: Value,
    method: Option<&str>,
    params: Option<&Value>,
) -> JsonRpcResponse {
    let audit_id = id.to_string();

    let response = match method {
        Some(QUERY_RIPE_METHOD) => handle_query_ripe(state, id, params).await,
        _ => json_rpc_error(id, METHOD_NOT_FOUND, "Method not found"),
    };

    // Params are not logged here; the adapter logs the query it forwards.
    info!(
        method = method.unwrap_or("<missing>"),
        id = %audit_id,
        outcome = if response.is_error() { "failure" } else { "success" },
        error_code = response.error_code(),
        "rpc call audited"
    );

    response
}

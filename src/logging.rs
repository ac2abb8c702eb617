//! Subscriber setup and per-request access logging
//!
//! `/mcp` reports protocol failures inside a 200 body, so a non-2xx status here means
//! the request never reached the dispatcher (unknown route, wrong verb, body rejected).

use std::time::Instant;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let content_length = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        content_length,
        duration_ms = elapsed_ms,
        "request summary"
    );

    match classify(status) {
        Rejection::None => {}
        Rejection::Client(reason) => warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            reason,
            "request rejected before dispatch"
        ),
        Rejection::Server => error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            "request failed"
        ),
    }

    response
}

#[derive(Debug, PartialEq, Eq)]
enum Rejection {
    None,
    Client(&'static str),
    Server,
}

fn classify(status: StatusCode) -> Rejection {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => Rejection::Client("body exceeds size limit"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => Rejection::Client("unsupported content type"),
        StatusCode::METHOD_NOT_ALLOWED => Rejection::Client("wrong http method"),
        StatusCode::NOT_FOUND => Rejection::Client("unknown route"),
        status if status.is_client_error() => Rejection::Client("client error"),
        status if status.is_server_error() => Rejection::Server,
        _ => Rejection::None,
    }
}

//! Failure taxonomy for `query_ripe`
//!
//! Every variant surfaces to callers as a JSON-RPC `-32000` error whose message is the
//! `Display` output below.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid params: {message}")]
    InvalidParams { message: &'static str },
    #[error("RIPE DB query error: {cause}")]
    Upstream { cause: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn invalid_params(message: &'static str) -> Self {
        Self::InvalidParams { message }
    }

    pub fn upstream(cause: impl Into<String>) -> Self {
        Self::Upstream {
            cause: cause.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

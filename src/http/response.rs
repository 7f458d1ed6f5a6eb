//! Proxy error taxonomy and its mapping to client responses.
//!
//! # Design Decisions
//! - Upstream responses are relayed untouched; only failures to reach the
//!   upstream produce a response of our own
//! - Unreachable upstream results in 502 Bad Gateway with a plain-text body
//! - No retry and no fallback: the caller sees the failure immediately

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors raised while forwarding a matched request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The upstream refused the connection, was unreachable, or hung up.
    #[error("upstream {upstream} unreachable: {source}")]
    Upstream {
        upstream: String,
        #[source]
        source: hyper_util::client::legacy::Error,
    },

    /// The matched request could not be rewritten for the upstream.
    #[error("cannot build upstream request: {0}")]
    Rewrite(#[from] axum::http::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::Rewrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

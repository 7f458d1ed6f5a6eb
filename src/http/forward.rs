//! Upstream transport.
//!
//! Thin wrapper around a pooled hyper client. Bodies stream in both
//! directions; nothing is buffered. Dropping the returned future (client went
//! away) drops the upstream call with it.

use axum::body::Body;
use axum::http::{Request, Response};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::http::response::ProxyError;

/// Sends rewritten requests to their upstream origin.
#[derive(Clone, Debug)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
}

impl Forwarder {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }

    /// Issue `request` (already pointed at its upstream) and relay the
    /// upstream's status, headers and body as-is.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response<Body>, ProxyError> {
        let upstream = match (request.uri().scheme(), request.uri().authority()) {
            (Some(scheme), Some(authority)) => format!("{}://{}", scheme, authority),
            _ => request.uri().to_string(),
        };

        let response = self
            .client
            .request(request)
            .await
            .map_err(|source| ProxyError::Upstream { upstream, source })?;

        Ok(response.map(Body::new))
    }
}

impl Default for Forwarder {
    fn default() -> Self {
        Self::new()
    }
}

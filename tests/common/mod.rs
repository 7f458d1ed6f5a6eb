//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use dev_router::config::{RouteConfig, RouterConfig};
use dev_router::{HttpServer, Shutdown};

/// A backend that echoes what it received as JSON and counts hits.
///
/// Responds with 201 and `x-upstream: echo` unless the request carries
/// `x-respond-status`, in which case that status is used.
pub struct EchoBackend {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicU32>,
}

impl EchoBackend {
    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }
}

pub async fn start_echo_backend() -> EchoBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));

    let counter = hits.clone();
    let app = Router::new().fallback(move |request: Request<Body>| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            echo(request).await
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    EchoBackend { addr, hits }
}

async fn echo(request: Request<Body>) -> impl IntoResponse {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    let status = header(&parts.headers, "x-respond-status")
        .and_then(|s| s.parse::<u16>().ok())
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::CREATED);

    let payload = json!({
        "method": parts.method.as_str(),
        "uri": parts.uri.to_string(),
        "host": header(&parts.headers, "host"),
        "x_custom": header(&parts.headers, "x-custom"),
        "content_type": header(&parts.headers, "content-type"),
        "body": String::from_utf8_lossy(&body),
    });

    (status, [("x-upstream", "echo")], Json(payload))
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Start the router on an ephemeral port.
pub async fn start_router(config: RouterConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// The built-in rule table, pointed at `origin` instead of port 8000.
pub fn default_config_for(origin: &str) -> RouterConfig {
    let mut config = RouterConfig::default();
    for route in &mut config.routes {
        route.target = origin.to_string();
    }
    config
}

pub fn config_with_routes(routes: Vec<RouteConfig>) -> RouterConfig {
    RouterConfig {
        routes,
        ..RouterConfig::default()
    }
}

/// An address nothing listens on.
pub async fn dead_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// A fresh directory under the system temp dir.
pub fn temp_site(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dev-router-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a catch-all handler
//! - Wire up middleware (request tracing)
//! - Bind server to listener
//! - Dispatch requests to the routing table
//! - Forward matched requests upstream, serve the rest locally

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, RouterConfig};
use crate::http::forward::Forwarder;
use crate::http::response::ProxyError;
use crate::http::static_files::LocalSite;
use crate::observability::metrics;
use crate::routing::{dispatch, Dispatch, RouteTable};

/// Label used for requests that no rule claimed.
const LOCAL_ROUTE: &str = "local";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub forwarder: Forwarder,
    pub local: LocalSite,
}

/// HTTP server for the development router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if any route is malformed; nothing is validated at request time.
    pub fn new(config: RouterConfig) -> Result<Self, ConfigError> {
        let routes = RouteTable::from_config(&config.routes).map_err(ConfigError::Validation)?;

        for rule in routes.rules() {
            tracing::info!(
                prefix = %rule.prefix(),
                upstream = %rule.upstream(),
                change_origin = rule.change_origin(),
                "Route registered"
            );
        }
        if routes.is_empty() {
            tracing::warn!("No routes configured, every request is served locally");
        }

        let state = AppState {
            routes: Arc::new(routes),
            forwarder: Forwarder::new(),
            local: LocalSite::new(&config.static_files),
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled axum router, for serving it some other way.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Main handler: route, then forward or serve locally.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (route, response) = match dispatch(request, &state.routes) {
        Ok(Dispatch::Forward { rule, request }) => {
            tracing::debug!(
                method = %method,
                path = %path,
                upstream = %rule.upstream(),
                "Forwarding request"
            );
            let response = match state.forwarder.forward(request).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(method = %method, path = %path, error = %e, "Upstream error");
                    e.into_response()
                }
            };
            (rule.prefix(), response)
        }
        Ok(Dispatch::Local(request)) => {
            tracing::trace!(method = %method, path = %path, "Serving locally");
            (LOCAL_ROUTE, state.local.serve(request).await)
        }
        Err(e) => {
            let e = ProxyError::from(e);
            tracing::error!(method = %method, path = %path, error = %e, "Request rewrite failed");
            (LOCAL_ROUTE, e.into_response())
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), route, start_time);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn unmatched_without_static_root_is_404() {
        let router = HttpServer::new(RouterConfig::default()).unwrap().into_router();
        let response = router
            .oneshot(Request::get("/static/logo.png").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_bad_gateway() {
        let dead = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let mut config = RouterConfig::default();
        for route in &mut config.routes {
            route.target = format!("http://{}", dead);
        }

        let router = HttpServer::new(config).unwrap().into_router();
        let response = router
            .oneshot(Request::get("/sales/orders").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn requests_are_counted_by_route() {
        let recorder = metrics_util::debugging::DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let _guard = ::metrics::set_default_local_recorder(&recorder);

        let dead = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let mut config = RouterConfig::default();
        for route in &mut config.routes {
            route.target = format!("http://{}", dead);
        }
        let router = HttpServer::new(config).unwrap().into_router();

        for path in ["/sales/orders", "/static/logo.png"] {
            router
                .clone()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
        }

        assert_eq!(
            crate::observability::metrics::tests::request_counts(&snapshotter),
            vec![
                ("/sales".to_string(), "502".to_string(), 1),
                ("local".to_string(), "404".to_string(), 1),
            ]
        );
    }

    #[test]
    fn malformed_route_fails_construction() {
        let mut config = RouterConfig::default();
        config.routes[2].target = "localhost:8000".into();
        let err = HttpServer::new(config).err().unwrap();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }
}

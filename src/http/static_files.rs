//! Local serving for requests no route claims.
//!
//! Files come from the frontend build directory. A GET/HEAD navigation that
//! asks for HTML and misses a file gets `index.html`, so client-side routes
//! survive a reload.

use axum::body::Body;
use axum::http::header::ACCEPT;
use axum::http::{Method, Request, Response, StatusCode, Uri};
use axum::response::IntoResponse;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::config::StaticFilesConfig;

#[derive(Clone, Debug)]
pub struct LocalSite {
    dir: Option<ServeDir>,
    html_fallback: bool,
}

impl LocalSite {
    pub fn new(config: &StaticFilesConfig) -> Self {
        Self {
            dir: config.root.as_ref().map(ServeDir::new),
            html_fallback: config.html_fallback,
        }
    }

    pub async fn serve(&self, request: Request<Body>) -> Response<Body> {
        let Some(dir) = &self.dir else {
            return StatusCode::NOT_FOUND.into_response();
        };

        let navigation = if self.html_fallback && is_html_navigation(&request) {
            Some(request.method().clone())
        } else {
            None
        };

        let response = serve_from(dir, request).await;
        match navigation {
            Some(method) if response.status() == StatusCode::NOT_FOUND => {
                tracing::debug!("Serving index.html for unknown navigation");
                let mut index = Request::new(Body::empty());
                *index.method_mut() = method;
                *index.uri_mut() = Uri::from_static("/index.html");
                serve_from(dir, index).await
            }
            _ => response,
        }
    }
}

async fn serve_from(dir: &ServeDir, request: Request<Body>) -> Response<Body> {
    match dir.clone().oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}

fn is_html_navigation<B>(request: &Request<B>) -> bool {
    let method_ok = request.method() == Method::GET || request.method() == Method::HEAD;
    method_ok
        && request
            .headers()
            .get_all(ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.contains("text/html"))
}

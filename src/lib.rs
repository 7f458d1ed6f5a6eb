//! Development request router library.
//!
//! Forwards requests under configured path prefixes to a backend origin and
//! serves everything else from the frontend build directory.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{dispatch, Dispatch, RouteRule, RouteTable};

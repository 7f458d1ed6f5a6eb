//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Upstream origin used by the built-in rule table.
pub const DEFAULT_BACKEND_ORIGIN: &str = "http://127.0.0.1:8000";

/// Path prefixes the ERP backend owns in the built-in rule table.
pub const DEFAULT_PREFIXES: [&str; 5] = ["/api", "/auth", "/dashboard", "/projects", "/sales"];

/// Root configuration for the development router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Ordered prefix rules. The first matching rule wins.
    pub routes: Vec<RouteConfig>,

    /// Local serving for requests no rule claims.
    pub static_files: StaticFilesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            static_files: StaticFilesConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// The rule table the frontend dev server ships with.
pub fn default_routes() -> Vec<RouteConfig> {
    DEFAULT_PREFIXES
        .iter()
        .map(|prefix| RouteConfig::new(*prefix, DEFAULT_BACKEND_ORIGIN))
        .collect()
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:5173").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5173".to_string(),
        }
    }
}

/// A single prefix-to-origin forwarding rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Literal path prefix, e.g. "/api".
    pub prefix: String,

    /// Upstream origin, e.g. "http://127.0.0.1:8000".
    pub target: String,

    /// Rewrite the Host header to the target authority.
    #[serde(default)]
    pub change_origin: bool,
}

impl RouteConfig {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
            change_origin: false,
        }
    }
}

/// Static file serving for unmatched requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory to serve from. `None` answers unmatched requests with 404.
    pub root: Option<PathBuf>,

    /// Serve `index.html` for HTML navigations that miss a file.
    pub html_fallback: bool,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: None,
            html_fallback: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_frontend_proxy() {
        let config = RouterConfig::default();
        let prefixes: Vec<_> = config.routes.iter().map(|r| r.prefix.as_str()).collect();
        assert_eq!(prefixes, ["/api", "/auth", "/dashboard", "/projects", "/sales"]);
        assert!(config
            .routes
            .iter()
            .all(|r| r.target == "http://127.0.0.1:8000" && !r.change_origin));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.routes.len(), 5);
        assert_eq!(config.listener.bind_address, "127.0.0.1:5173");
        assert!(config.static_files.root.is_none());
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn explicit_routes_replace_defaults() {
        let config: RouterConfig = toml::from_str(
            r#"
            [[routes]]
            prefix = "/graphql"
            target = "http://localhost:4000"
            change_origin = true
            "#,
        )
        .unwrap();
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].prefix, "/graphql");
        assert!(config.routes[0].change_origin);
    }
}

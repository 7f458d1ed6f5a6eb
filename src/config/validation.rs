//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route prefix and upstream origin
//! - Validate listener and metrics addresses
//! - Check that the static root exists when one is configured
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system, never at request time

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use axum::http::uri::{Authority, Scheme};
use url::Url;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::routing::router::{RouteRule, Upstream};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("route #{index}: prefix must not be empty")]
    EmptyPrefix { index: usize },

    #[error("route #{index}: prefix {prefix:?} must start with '/'")]
    RelativePrefix { index: usize, prefix: String },

    #[error("route #{index}: target {target:?} is not a valid origin: {reason}")]
    InvalidTarget {
        index: usize,
        target: String,
        reason: String,
    },

    #[error("listener.bind_address {address:?} is not a socket address")]
    InvalidBindAddress { address: String },

    #[error("observability.metrics_address {address:?} is not a socket address")]
    InvalidMetricsAddress { address: String },

    #[error("static_files.root {path:?} is not a directory")]
    MissingStaticRoot { path: PathBuf },
}

/// Validate a whole configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            address: config.listener.bind_address.clone(),
        });
    }

    for (index, route) in config.routes.iter().enumerate() {
        if let Err(route_errors) = validate_route(index, route) {
            errors.extend(route_errors);
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress {
            address: config.observability.metrics_address.clone(),
        });
    }

    if let Some(root) = &config.static_files.root {
        if !root.is_dir() {
            errors.push(ValidationError::MissingStaticRoot { path: root.clone() });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check one route and compile it into a [`RouteRule`].
///
/// `index` is the rule's position in the table and is only used for messages.
pub fn validate_route(index: usize, route: &RouteConfig) -> Result<RouteRule, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if route.prefix.is_empty() {
        errors.push(ValidationError::EmptyPrefix { index });
    } else if !route.prefix.starts_with('/') {
        errors.push(ValidationError::RelativePrefix {
            index,
            prefix: route.prefix.clone(),
        });
    }

    let upstream = match parse_origin(&route.target) {
        Ok(upstream) => Some(upstream),
        Err(reason) => {
            errors.push(ValidationError::InvalidTarget {
                index,
                target: route.target.clone(),
                reason,
            });
            None
        }
    };

    match upstream {
        Some(upstream) if errors.is_empty() => Ok(RouteRule::new(
            route.prefix.clone(),
            upstream,
            route.change_origin,
        )),
        _ => Err(errors),
    }
}

/// Parse an absolute `http://host[:port]` origin.
pub fn parse_origin(target: &str) -> Result<Upstream, String> {
    let url = Url::parse(target).map_err(|e| e.to_string())?;

    if url.scheme() != "http" {
        return Err(format!("unsupported scheme {:?}, expected \"http\"", url.scheme()));
    }
    let host = url.host_str().ok_or_else(|| "missing host".to_string())?;
    if !url.username().is_empty() || url.password().is_some() {
        return Err("credentials are not allowed".to_string());
    }
    if url.path() != "/" {
        return Err(format!("unexpected path {:?}", url.path()));
    }
    if url.query().is_some() {
        return Err("unexpected query string".to_string());
    }
    if url.fragment().is_some() {
        return Err("unexpected fragment".to_string());
    }

    let authority = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    let authority = Authority::from_str(&authority).map_err(|e| e.to_string())?;

    Ok(Upstream::new(Scheme::HTTP, authority))
}

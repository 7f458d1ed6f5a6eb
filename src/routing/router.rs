//! Route lookup and request rewriting.
//!
//! # Responsibilities
//! - Store compiled rules in declared order
//! - Look up the first rule matching a request path
//! - Rewrite a matched request so it targets the rule's upstream origin
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan (route tables here hold a handful of rules)
//! - Explicit `Dispatch::Local` rather than a silent default upstream
//! - Pure: no I/O, so every routing decision is unit-testable

use std::fmt;

use axum::http::header::{HeaderValue, HOST};
use axum::http::uri::{Authority, Scheme};
use axum::http::{Request, Uri, Version};

use crate::config::schema::RouteConfig;
use crate::config::validation::{validate_route, ValidationError};
use crate::routing::matcher::PathPrefixMatcher;

/// A validated upstream origin (scheme + host + port).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    scheme: Scheme,
    authority: Authority,
}

impl Upstream {
    pub fn new(scheme: Scheme, authority: Authority) -> Self {
        Self { scheme, authority }
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Absolute URI for `path_and_query` on this origin.
    pub fn uri_for(&self, path_and_query: &str) -> Result<Uri, axum::http::Error> {
        Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)
    }
}

/// A compiled forwarding rule.
#[derive(Debug, Clone)]
pub struct RouteRule {
    matcher: PathPrefixMatcher,
    upstream: Upstream,
    change_origin: bool,
}

impl RouteRule {
    pub fn new(prefix: impl Into<String>, upstream: Upstream, change_origin: bool) -> Self {
        Self {
            matcher: PathPrefixMatcher::new(prefix),
            upstream,
            change_origin,
        }
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn upstream(&self) -> &Upstream {
        &self.upstream
    }

    pub fn change_origin(&self) -> bool {
        self.change_origin
    }

    pub fn matches_path(&self, path: &str) -> bool {
        self.matcher.matches_path(path)
    }

    /// Point `request` at this rule's upstream.
    ///
    /// Method, path, query, headers and body are kept. Only the URI's scheme
    /// and authority change, plus the Host header when `change_origin` is set.
    pub fn rewrite<B>(&self, request: Request<B>) -> Result<Request<B>, axum::http::Error> {
        let (mut parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        parts.uri = self.upstream.uri_for(path_and_query)?;
        parts.version = Version::HTTP_11;

        if self.change_origin {
            let host = HeaderValue::from_str(self.upstream.authority().as_str())?;
            parts.headers.insert(HOST, host);
        }

        Ok(Request::from_parts(parts, body))
    }
}

/// Outcome of routing one request.
#[derive(Debug)]
pub enum Dispatch<'a, B> {
    /// Forward the rewritten request to the rule's upstream.
    Forward {
        rule: &'a RouteRule,
        request: Request<B>,
    },
    /// No rule matched; serve locally. The request is untouched.
    Local(Request<B>),
}

/// Ordered, immutable rule table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// Compile route configs, keeping their order.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, Vec<ValidationError>> {
        let mut rules = Vec::with_capacity(routes.len());
        let mut errors = Vec::new();

        for (index, route) in routes.iter().enumerate() {
            match validate_route(index, route) {
                Ok(rule) => rules.push(rule),
                Err(route_errors) => errors.extend(route_errors),
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        for (i, rule) in rules.iter().enumerate() {
            if let Some(earlier) = rules[..i]
                .iter()
                .find(|e| rule.matcher.is_shadowed_by(&e.matcher))
            {
                tracing::warn!(
                    prefix = %rule.prefix(),
                    shadowed_by = %earlier.prefix(),
                    "Route can never match"
                );
            }
        }

        Ok(Self::new(rules))
    }

    /// First rule whose prefix begins `path`.
    pub fn resolve(&self, path: &str) -> Option<&RouteRule> {
        self.rules.iter().find(|rule| rule.matches_path(path))
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Route `request` against `table`.
pub fn dispatch<B>(request: Request<B>, table: &RouteTable) -> Result<Dispatch<'_, B>, axum::http::Error> {
    match table.resolve(request.uri().path()) {
        Some(rule) => Ok(Dispatch::Forward {
            rule,
            request: rule.rewrite(request)?,
        }),
        None => Ok(Dispatch::Local(request)),
    }
}

//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, method, headers, body)
//!     → router.rs (first-match lookup over the rule table)
//!     → matcher.rs (literal prefix comparison)
//!     → Dispatch::Forward(rewritten request) or Dispatch::Local(request)
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → validate prefixes and origins
//!     → keep declared order
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by declaration)

pub mod matcher;
pub mod router;

pub use router::{dispatch, Dispatch, RouteRule, RouteTable, Upstream};

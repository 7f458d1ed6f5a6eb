//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms per forwarded request)
//!
//! Consumers:
//!     → stdout (pretty for humans, JSON for log tooling)
//!     → Metrics endpoint (Prometheus scrape, off by default)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the configured level
//! - Metrics are cheap to record and no-ops until an exporter is installed

pub mod logging;
pub mod metrics;

pub use logging::init_logging;

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing layer)
//!     → routing::dispatch (first-match prefix lookup)
//!     ├─ Forward → forward.rs (hyper client) → upstream response relayed as-is
//!     │            └─ connection failure → response.rs (502)
//!     └─ Local   → static_files.rs (build directory, html fallback)
//! ```

pub mod forward;
pub mod response;
pub mod server;
pub mod static_files;

pub use forward::Forwarder;
pub use response::ProxyError;
pub use server::HttpServer;
pub use static_files::LocalSite;

//! dev-router
//!
//! Local development front server for the ERP web app.
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 dev-router                    │
//!   Browser request    │  ┌────────┐    ┌──────────┐                   │
//!   ───────────────────┼─▶│  http  │───▶│ routing  │── prefix match ───┼──▶ Backend
//!                      │  │ server │    │  table   │   (/api, /auth,   │   127.0.0.1:8000
//!                      │  └────────┘    └────┬─────┘    /dashboard,    │
//!                      │                     │          /projects,     │
//!                      │                     │ no match  /sales)       │
//!                      │                     ▼                         │
//!                      │              ┌─────────────┐                  │
//!   Local response     │              │static files │                  │
//!   ◀──────────────────┼──────────────│ + fallback  │                  │
//!                      │              └─────────────┘                  │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use dev_router::config::{assemble_config, ConfigOverrides, LogFormat};
use dev_router::observability::{self, metrics};
use dev_router::{HttpServer, Shutdown};

/// Development request router: forwards backend prefixes, serves the rest.
#[derive(Parser, Debug)]
#[command(name = "dev-router", version)]
struct Args {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, env = "DEV_ROUTER_CONFIG")]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override static_files.root.
    #[arg(long)]
    static_root: Option<PathBuf>,

    /// Override observability.log_format.
    #[arg(long, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_address: self.bind.clone(),
            static_root: self.static_root.clone(),
            log_format: self.log_format,
        }
    }
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    match s {
        "pretty" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(format!("unknown log format {other:?}, expected pretty or json")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = assemble_config(args.config.as_deref(), &args.overrides())?;

    observability::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        "dev-router starting"
    );

    if config.observability.metrics_enabled {
        // Address already validated.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics endpoint");
            }
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

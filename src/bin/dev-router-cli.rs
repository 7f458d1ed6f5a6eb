use std::path::PathBuf;

use axum::http::Uri;
use clap::{Parser, Subcommand};
use serde_json::json;

use dev_router::config::{read_config, ConfigError, RouterConfig};
use dev_router::routing::{RouteTable, Upstream};

#[derive(Parser)]
#[command(name = "dev-router-cli")]
#[command(about = "Inspect and probe a dev-router configuration", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, env = "DEV_ROUTER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rule table in match order
    Routes {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show where a request path would go
    Resolve {
        /// Request path, optionally with a query string
        path: String,
    },
    /// GET a path on every distinct upstream and report the outcome
    Probe {
        #[arg(long, default_value = "/api/health/")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => read_config(path)?,
        None => RouterConfig::default(),
    };
    let table = RouteTable::from_config(&config.routes).map_err(ConfigError::Validation)?;

    match cli.command {
        Commands::Routes { json } => print_routes(&table, json)?,
        Commands::Resolve { path } => println!("{}", resolve(&table, &path)?),
        Commands::Probe { path } => probe(&table, &path).await?,
    }

    Ok(())
}

/// Describe where `path` goes: the forwarded URL and its rule, or `local`.
fn resolve(table: &RouteTable, path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let uri: Uri = path.parse()?;
    match table.resolve(uri.path()) {
        Some(rule) => {
            let pq = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
            Ok(format!("{} (rule {})", rule.upstream().uri_for(pq)?, rule.prefix()))
        }
        None => Ok("local".to_string()),
    }
}

fn print_routes(table: &RouteTable, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        let rules: Vec<_> = table
            .rules()
            .iter()
            .map(|rule| {
                json!({
                    "prefix": rule.prefix(),
                    "target": rule.upstream().to_string(),
                    "change_origin": rule.change_origin(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    if table.is_empty() {
        println!("(no routes; everything is served locally)");
    }
    for rule in table.rules() {
        let flag = if rule.change_origin() { "  [change-origin]" } else { "" };
        println!("{:<16} -> {}{}", rule.prefix(), rule.upstream(), flag);
    }
    Ok(())
}

async fn probe(table: &RouteTable, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut upstreams: Vec<&Upstream> = Vec::new();
    for rule in table.rules() {
        if !upstreams.contains(&rule.upstream()) {
            upstreams.push(rule.upstream());
        }
    }

    let client = reqwest::Client::builder().no_proxy().build()?;
    let mut unreachable = 0;
    for upstream in upstreams {
        let url = upstream.uri_for(path)?.to_string();
        match client.get(&url).send().await {
            Ok(res) => println!("{url}: {}", res.status()),
            Err(e) => {
                unreachable += 1;
                eprintln!("{url}: unreachable ({e})");
            }
        }
    }

    if unreachable > 0 {
        return Err(format!("{unreachable} upstream(s) unreachable").into());
    }
    Ok(())
}

//! ipgate demo server
//!
//! A small axum service with the IP restriction middleware installed,
//! useful for exercising a rule set end to end. Real deployments embed
//! the library's layer into their own router instead.

use axum::{Json, Router, middleware::from_fn_with_state, routing::get};
use clap::Parser;
use ipgate::config::{AppConfig, LogFormat, load_config};
use ipgate::middleware::{RestrictionState, enforce};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// ipgate - IP allow-list request filtering
#[derive(Parser, Debug)]
#[command(name = "ipgate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "IPGATE_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "IPGATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Host to bind to
    #[arg(long, env = "IPGATE_HOST")]
    host: Option<String>,

    /// Port to bind to
    #[arg(long, env = "IPGATE_PORT")]
    port: Option<u16>,

    /// Path prefix classified as the admin surface
    #[arg(long, env = "IPGATE_ADMIN_PREFIX")]
    admin_prefix: Option<String>,
}

fn init_logging(args: &Args, config: &AppConfig) {
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = match config.logging.format {
        LogFormat::Pretty => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry().with(fmt_layer).with(filter).init();
}

async fn index() -> &'static str {
    "ipgate demo\n"
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn admin_index() -> &'static str {
    "admin surface\n"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a .env file before reading any variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(prefix) = &args.admin_prefix {
        config.server.admin_prefix = prefix.clone();
    }

    init_logging(&args, &config);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting ipgate");

    let state = RestrictionState::from_config(&config.restriction, &config.server);
    if !state.gate.is_active() {
        info!("No restriction configured; all requests will pass through");
    }

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/admin", get(admin_index))
        .layer(from_fn_with_state(state, enforce))
        .layer(TraceLayer::new_for_http());

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received shutdown signal");
    })
    .await?;

    Ok(())
}

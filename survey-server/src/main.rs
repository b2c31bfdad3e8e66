//! survey-server - HTTP service for survey feedback
//!
//! Startup order: CLI args, TOML config, tracing, database, router.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use survey_common::config::{self, TomlConfig, DEFAULT_PORT};
use survey_common::db::init_database;
use survey_server::{build_router, generator, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "survey_server=info,survey_common=info,tower_http=info";

/// Command-line arguments for survey-server
#[derive(Parser, Debug)]
#[command(name = "survey-server")]
#[command(about = "Survey feedback service with sentiment analysis")]
#[command(version)]
struct Args {
    /// Port to listen on (default 8000)
    #[arg(short, long, env = "SURVEY_PORT")]
    port: Option<u16>,

    /// Address to bind (default 0.0.0.0)
    #[arg(short, long, env = "SURVEY_BIND_ADDRESS")]
    bind: Option<String>,

    /// Folder holding survey.db (env: SURVEY_DATA_FOLDER)
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// Path to config.toml (env: SURVEY_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = config::config_file_path(args.config.as_deref());
    let toml_config = TomlConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // RUST_LOG, then config log_level, then built-in default
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = toml_config.log_level.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
            tracing_subscriber::EnvFilter::try_new(directives)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER))
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting survey-server v{}", env!("CARGO_PKG_VERSION"));
    if config_path.exists() {
        info!("Config file: {}", config_path.display());
    } else {
        warn!("Config file {} not found, using defaults", config_path.display());
    }

    let data_folder = config::resolve_data_folder(args.data_folder.as_deref(), &toml_config);
    let db_path = config::database_path(&data_folder);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;
    info!("Database ready");

    let generator = generator::from_config(&toml_config.generator)
        .context("Failed to set up question generator")?;
    info!("Question generator: {}", generator.name());

    let state = AppState::new(pool, Arc::from(generator));
    let app = build_router(state);

    let bind = args
        .bind
        .or(toml_config.bind_address)
        .unwrap_or_else(|| "0.0.0.0".to_string());
    let port = args.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("survey-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

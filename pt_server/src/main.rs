//! Poker tournament records server.
//!
//! Serves the tournament JSON API over HTTP, backed by PostgreSQL.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use pico_args::Arguments;
use poker_tracker::{TournamentManager, db::Database};
use pt_server::{
    api,
    config::{ConfigOverrides, ServerConfig},
    logging, metrics,
};
use tracing::{info, warn};

const HELP: &str = "\
Run the poker tournament records server

USAGE:
  pt_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT  Server socket bind address  [default: env SERVER_BIND or 0.0.0.0:$PORT]
  --port          PORT     Port to listen on           [default: env PORT or 5000]
  --db-url        URL      Database connection string  [default: env DATABASE_URL or postgres://postgres@localhost:5432/pokertracker]
  --metrics-bind  IP:PORT  Prometheus scrape address   [default: env METRICS_BIND, disabled if unset]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  PORT                     Port, used when SERVER_BIND is unset
  DATABASE_URL             PostgreSQL connection string
  DB_MAX_CONNECTIONS       Pool size limit (default: 10)
  RUST_LOG                 Log filter (default: info,sqlx=warn,hyper=warn)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = ConfigOverrides {
        bind: pargs.opt_value_from_str::<_, SocketAddr>("--bind")?,
        port: pargs.opt_value_from_str("--port")?,
        database_url: pargs.opt_value_from_str("--db-url")?,
        metrics_bind: pargs.opt_value_from_str::<_, SocketAddr>("--metrics-bind")?,
    };

    logging::init();

    let unused = pargs.finish();
    if !unused.is_empty() {
        warn!("Ignoring unrecognized arguments: {:?}", unused);
    }

    let config = ServerConfig::from_env(overrides)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr)?;
        info!("Prometheus metrics available at http://{}/metrics", addr);
    }

    info!(
        "Connecting to database (max {} connections)",
        config.database.max_connections
    );
    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    info!("Database connected successfully");

    let state = api::AppState {
        tournament_manager: Arc::new(TournamentManager::from_pool(Arc::new(db.pool().clone()))),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");
    db.close().await;
    info!("Database pool closed");

    Ok(())
}

/// Graceful shutdown signal: Ctrl+C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

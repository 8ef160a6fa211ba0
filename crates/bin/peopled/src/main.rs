//! # peopled, people service daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) once
//! - Initialise `tracing` from the configured filter
//! - Resolve the database path and prepare its directory
//! - Open the `SQLite` pool and create the schema
//! - Construct the repository and the person service
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;
mod storage_path;

use people_adapter_http_axum::router;
use people_adapter_http_axum::state::{AppInfo, AppState};
use people_adapter_storage_sqlite_sqlx::{Config as DbConfig, SqlitePersonRepository};
use people_app::services::person_service::PersonService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::storage_path::StorageEnv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Database
    let working_dir = std::env::current_dir()?;
    let location = StorageEnv::new(&config.database, working_dir).prepare();
    tracing::info!(
        path = %location.path.display(),
        source = ?location.source,
        "resolved database path"
    );
    let db = DbConfig::file(&location.path).build().await?;

    // Services
    let person_service = PersonService::new(SqlitePersonRepository::new(db.pool().clone()));

    // HTTP
    let info = AppInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
    };
    let app = router::build(AppState::new(person_service, info), &config.web);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "peopled listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.pool().close().await;
    tracing::info!("peopled stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

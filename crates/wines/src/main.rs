mod app;
mod config;
mod context;
mod handlers;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wines_core::storage::WineRepository;

use crate::{app::create_app, config::Config, state::AppState};

/// Wines - HTTP CRUD service for the wine collection
#[derive(Parser, Debug)]
#[command(name = "wines")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wines=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        table = %config.table_name,
        region = ?config.region,
        endpoint = ?config.endpoint_url,
        key_type = config.key_type.tag(),
        "Loaded configuration"
    );

    let wine_repo = init_repository(&config).await;
    let state = AppState::new(wine_repo, config);

    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Build the repository for the storage backend selected at compile time.
#[cfg(feature = "inmemory")]
async fn init_repository(_config: &Config) -> Arc<dyn WineRepository> {
    tracing::warn!("Using in-memory storage, data will not survive a restart");
    Arc::new(storage::InMemoryRepository::new())
}

/// Build the repository for the storage backend selected at compile time.
#[cfg(feature = "dynamodb")]
async fn init_repository(config: &Config) -> Arc<dyn WineRepository> {
    let repo = storage::DynamoDbRepository::from_config(config).await;
    tracing::info!(table = repo.table_name(), "Using DynamoDB storage");
    Arc::new(repo)
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}

//! Startup: open the store, bind a listener, serve until Ctrl-C.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{Config, StoreBackend};
use crate::state::AppState;
use crate::store::{create_pool, MemoryProductStore, PgProductStore, ProductStore};

/// How many ports after the configured one are tried before giving up.
const PORT_ATTEMPTS: u16 = 20;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create database pool")]
    Database(#[source] sqlx::Error),

    #[error("failed to bind to any port starting at {port} on {host}")]
    Bind { host: IpAddr, port: u16 },

    #[error("server error")]
    Serve(#[source] std::io::Error),
}

pub async fn open_store(backend: &StoreBackend) -> Result<Arc<dyn ProductStore>, StartupError> {
    match backend {
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = create_pool(database_url, *max_connections)
                .await
                .map_err(StartupError::Database)?;
            Ok(Arc::new(PgProductStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on shutdown");
            Ok(Arc::new(MemoryProductStore::new()))
        }
    }
}

// Try base port..base port+20 to avoid crash when address is in use
pub async fn bind(host: IpAddr, base_port: u16) -> Result<TcpListener, StartupError> {
    for offset in 0..=PORT_ATTEMPTS {
        let addr = SocketAddr::from((host, base_port.saturating_add(offset)));
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                tracing::info!("Server running on {}", addr);
                return Ok(listener);
            }
            Err(e) => {
                if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
            }
        }
    }

    Err(StartupError::Bind {
        host,
        port: base_port,
    })
}

pub async fn run(config: &Config) -> Result<(), StartupError> {
    let store = open_store(&config.store).await?;
    let listener = bind(config.host, config.port).await?;
    let app = crate::build_app(AppState::new(store));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

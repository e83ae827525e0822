use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use reservation_server::config::ServerConfig;
use reservation_server::store::DocumentStore;
use reservation_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let store = match &config.data_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "opening document store");
            DocumentStore::open(dir).await?
        }
        None => {
            tracing::warn!("no data directory configured, reservations will not survive a restart");
            DocumentStore::in_memory()
        }
    };

    let state = AppState::from_store(Arc::new(store), config.policy.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        creation_window_days = config.policy.creation_window_days,
        lock_window_days = config.policy.lock_window_days,
        "reservation server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod domain;
mod receipts;
mod rest;

use config::ServerConfig;
use db::DbConnection;
use domain::BillService;
use receipts::ReceiptStore;
use rest::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    let receipts = ReceiptStore::new(config.upload_dir.clone());
    info!("Storing receipts in {:?}", receipts.dir());

    let state = AppState::new(BillService::new(db, receipts));
    let app = create_router(state, &config)?;

    info!("Starting server on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Listening on {}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}

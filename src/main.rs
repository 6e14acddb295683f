//! Marketplace server
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use market_api::AppState;
use market_core::config::{AppConfig, StoreProvider};
use market_core::error::AppError;
use market_database::migration::run_migrations;
use market_database::repositories::{ProductStore, UserStore};
use market_database::{DatabasePool, MemoryProductStore, MemoryUserStore};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("MARKET_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Select the stores, build the state and serve
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        provider = ?config.database.provider,
        "Starting marketplace server"
    );

    let (db, users, products) = match config.database.provider {
        StoreProvider::Postgres => {
            let db = DatabasePool::connect(&config.database).await?;
            run_migrations(db.pool()).await?;
            let users: Arc<dyn UserStore> = Arc::new(db.users());
            let products: Arc<dyn ProductStore> = Arc::new(db.products());
            (Some(db), users, products)
        }
        StoreProvider::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
            let products: Arc<dyn ProductStore> = Arc::new(MemoryProductStore::new());
            (None, users, products)
        }
    };

    let state = AppState::new(config, users, products)?;
    let served = market_api::serve(state).await;

    if let Some(db) = db {
        db.close().await;
    }
    served
}

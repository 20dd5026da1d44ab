use std::sync::Arc;

use anyhow::Context;
use studyplan_api::app::{router, AppState};
use studyplan_api::config::{self, Environment};
use studyplan_api::database::{DatabaseManager, MemoryStore, PgStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, ADMIN_EMAILS, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config().clone();
    tracing::info!("Starting Study Planner API in {:?} mode", config.environment);

    let state = match config.database.url {
        Some(_) => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to create database pool")?;
            AppState::new(config.clone(), Arc::new(PgStore::new(pool)))
        }
        None if config.environment == Environment::Development => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            AppState::new(config.clone(), Arc::new(MemoryStore::new()))
        }
        None => anyhow::bail!("DATABASE_URL must be set outside development"),
    };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Study Planner API listening on http://{}", bind_addr);

    axum::serve(listener, router(state)).await.context("server error")?;
    Ok(())
}

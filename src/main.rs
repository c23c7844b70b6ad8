use std::sync::Arc;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use newsroom_api::auth::JwtKeys;
use newsroom_api::config;
use newsroom_api::database::DatabaseManager;
use newsroom_api::state::AppState;
use newsroom_api::store::{EntityStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("newsroom_api=info,tower_http=info")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Newsroom API in {:?} mode", config.environment);

    // Only the development preset ships a secret
    if config.security.jwt_secret.is_empty() {
        bail!("JWT_SECRET must be set in {:?} mode", config.environment);
    }
    let keys = JwtKeys::from_config(&config.security).context("invalid JWT configuration")?;

    let store: Arc<dyn EntityStore> = match &config.database.url {
        Some(url) => {
            let pool = DatabaseManager::connect(&config.database).await?;
            tracing::info!("Connected to {}", DatabaseManager::redacted_url(url)?);
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, keys, config);
    let app = newsroom_api::app(state, config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Newsroom API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

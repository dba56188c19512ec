use std::sync::Arc;

use anyhow::Context;

use inventory_api_rust::config::{AppConfig, Environment};
use inventory_api_rust::resources::ALL_COLLECTIONS;
use inventory_api_rust::routes;
use inventory_api_rust::state::AppState;
use inventory_api_rust::store::{DocumentStore, MemoryStore, PgDocumentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Inventory API in {:?} mode", config.environment);

    if config.environment == Environment::Production && config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set in production");
    }

    let store: Arc<dyn DocumentStore> = match &config.database.url {
        Some(url) => {
            let store = PgDocumentStore::connect(
                url,
                &config.database_name(),
                config.database.max_connections,
            )
            .await
            .context("failed to connect to database")?;
            store
                .ensure_collections(ALL_COLLECTIONS)
                .await
                .context("failed to prepare collections")?;
            Arc::new(store)
        }
        None => {
            if config.environment == Environment::Production {
                anyhow::bail!("DATABASE_URL must be set in production");
            }
            tracing::warn!("DATABASE_URL not set; using in-memory store (data is not persisted)");
            Arc::new(MemoryStore::new())
        }
    };

    let port = config.server.port;
    let app = routes::app(AppState::new(store, Arc::new(config)));

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Inventory API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}

//! Shared application state

use crate::config::{Config, StorageBackend};
use crate::db;
use anyhow::Context;
use estate_catalog::{Catalog, CatalogOptions, CancellationToken, InMemoryStore, PropertyStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub config: Arc<Config>,
    /// Cancelled when the server begins shutting down; requests derive child tokens.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Connect the configured storage backend and prepare it for traffic.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn PropertyStore> = match config.database.backend {
            StorageBackend::Postgres => {
                let pool = db::create_pool(&config.database).await?;
                db::ensure_schema(&pool)
                    .await
                    .context("Failed to bootstrap database schema")?;
                Arc::new(db::PostgresPropertyStore::new(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Arc::new(InMemoryStore::new())
            }
        };

        let state = Self::with_store(config, store);

        if state.config.catalog.seed_on_startup {
            let inserted = state
                .catalog
                .seed_if_empty(&state.shutdown)
                .await
                .context("Failed to seed demo properties")?;
            tracing::info!(inserted, "Startup seed complete");
        }

        Ok(state)
    }

    /// State over an already constructed store.
    pub fn with_store(config: Config, store: Arc<dyn PropertyStore>) -> Self {
        let options = CatalogOptions {
            generator_seed: config.catalog.generator_seed,
        };
        Self {
            catalog: Catalog::with_options(store, options),
            config: Arc::new(config),
            shutdown: CancellationToken::new(),
        }
    }
}

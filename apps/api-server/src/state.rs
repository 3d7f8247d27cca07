//! Application state - shared across all handlers.

use chirp_core::Engine;
use chirp_core::ports::Stores;

use crate::config::{AppConfig, FeedLimits};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub feed: FeedLimits,
}

impl AppState {
    pub fn with_stores(stores: Stores, feed: FeedLimits) -> Self {
        Self {
            engine: Engine::new(stores),
            feed,
        }
    }

    /// Build the application state, on PostgreSQL when configured and reachable.
    pub async fn new(config: &AppConfig) -> Self {
        let stores = Self::stores(config).await;
        tracing::info!("Application state initialized");
        Self::with_stores(stores, config.feed)
    }

    #[cfg(feature = "postgres")]
    async fn stores(config: &AppConfig) -> Stores {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return chirp_infra::in_memory_stores();
        };

        match chirp_infra::database::connect(db_config).await {
            Ok(db) => chirp_infra::postgres_stores(std::sync::Arc::new(db)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                chirp_infra::in_memory_stores()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn stores(_config: &AppConfig) -> Stores {
        tracing::info!("Running without postgres feature - using in-memory store");
        chirp_infra::in_memory_stores()
    }
}

//! Counter store manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use reshub_core::config::StoreConfig;
use reshub_core::error::AppError;
use reshub_core::result::AppResult;
use reshub_core::traits::counter::{CounterStore, DecrementOutcome};

/// Counter store manager that wraps the configured provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct CounterStoreManager {
    /// The inner counter store.
    inner: Arc<dyn CounterStore>,
}

impl CounterStoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn CounterStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis counter store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisCounterStore::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory counter store");
                Arc::new(crate::memory::MemoryCounterStore::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn CounterStore>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl CounterStore for CounterStoreManager {
    async fn get(&self, key: &str) -> AppResult<Option<u64>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: u64) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn decrement_if_positive(&self, key: &str) -> AppResult<DecrementOutcome> {
        self.inner.decrement_if_positive(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

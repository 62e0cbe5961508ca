//! In-memory counter store using the dashmap crate.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use reshub_core::config::MemoryStoreConfig;
use reshub_core::result::AppResult;
use reshub_core::traits::counter::{CounterStore, DecrementOutcome};

/// In-memory counter store for single-node deployments.
///
/// `decrement_if_positive` runs while holding the write lock of the shard
/// that owns the key, so the check and the decrement cannot interleave with
/// another caller.
#[derive(Debug, Clone)]
pub struct MemoryCounterStore {
    /// Counter values by key.
    counters: Arc<DashMap<String, u64>>,
}

impl MemoryCounterStore {
    /// Create a new in-memory store from configuration.
    pub fn new(config: &MemoryStoreConfig) -> Self {
        Self {
            counters: Arc::new(DashMap::with_capacity(config.initial_capacity)),
        }
    }
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::new(&MemoryStoreConfig::default())
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn get(&self, key: &str) -> AppResult<Option<u64>> {
        Ok(self.counters.get(key).map(|value| *value))
    }

    async fn set(&self, key: &str, value: u64) -> AppResult<()> {
        self.counters.insert(key.to_string(), value);
        Ok(())
    }

    async fn decrement_if_positive(&self, key: &str) -> AppResult<DecrementOutcome> {
        let outcome = match self.counters.get_mut(key) {
            Some(mut value) if *value > 0 => {
                *value -= 1;
                DecrementOutcome::Decremented { remaining: *value }
            }
            _ => DecrementOutcome::Insufficient,
        };
        debug!(key, ?outcome, "Counter decrement");
        Ok(outcome)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get() {
        let store = MemoryCounterStore::default();
        assert_eq!(store.get("available_seats").await.unwrap(), None);
        store.set("available_seats", 50).await.unwrap();
        assert_eq!(store.get("available_seats").await.unwrap(), Some(50));
    }

    #[tokio::test]
    async fn test_decrement_stops_at_zero() {
        let store = MemoryCounterStore::default();
        store.set("item.3", 2).await.unwrap();

        assert_eq!(
            store.decrement_if_positive("item.3").await.unwrap(),
            DecrementOutcome::Decremented { remaining: 1 }
        );
        assert_eq!(
            store.decrement_if_positive("item.3").await.unwrap(),
            DecrementOutcome::Decremented { remaining: 0 }
        );
        assert_eq!(
            store.decrement_if_positive("item.3").await.unwrap(),
            DecrementOutcome::Insufficient
        );
        assert_eq!(store.get("item.3").await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_decrement_missing_key_is_insufficient() {
        let store = MemoryCounterStore::default();
        assert_eq!(
            store.decrement_if_positive("item.99").await.unwrap(),
            DecrementOutcome::Insufficient
        );
        assert_eq!(store.get("item.99").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_decrements_never_oversell() {
        let store = MemoryCounterStore::default();
        store.set("available_seats", 30).await.unwrap();

        let tasks = (0..100).map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.decrement_if_positive("available_seats").await })
        });
        let results = futures::future::join_all(tasks).await;

        let granted = results
            .into_iter()
            .map(|joined| joined.unwrap().unwrap())
            .filter(|outcome| matches!(outcome, DecrementOutcome::Decremented { .. }))
            .count();

        assert_eq!(granted, 30);
        assert_eq!(store.get("available_seats").await.unwrap(), Some(0));
    }
}

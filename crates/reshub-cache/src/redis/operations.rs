//! Redis counter store implementation.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use reshub_core::error::{AppError, ErrorKind};
use reshub_core::result::AppResult;
use reshub_core::traits::counter::{CounterStore, DecrementOutcome};

use super::client::RedisClient;

/// Lua script for the atomic decrement.
///
/// KEYS[1] = counter key
///
/// Returns:
///   n >= 0 = decremented, n is the remaining count
///  -1      = counter missing or already at zero
const DECREMENT_IF_POSITIVE_SCRIPT: &str = r#"
    local current = tonumber(redis.call('GET', KEYS[1]))
    if current == nil or current <= 0 then
        return -1
    end
    return redis.call('DECR', KEYS[1])
"#;

/// Redis-backed counter store. Safe to share between processes.
#[derive(Debug, Clone)]
pub struct RedisCounterStore {
    /// Redis client.
    client: RedisClient,
}

impl RedisCounterStore {
    /// Create a new Redis counter store.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::StoreUnavailable, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn get(&self, key: &str) -> AppResult<Option<u64>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let raw: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;

        raw.map(|value| {
            value.parse::<u64>().map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Counter '{key}' holds a non-integer value '{value}'"),
                    e,
                )
            })
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: u64) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn
            .set(&full_key, value.to_string())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn decrement_if_positive(&self, key: &str) -> AppResult<DecrementOutcome> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();

        let result: i64 = redis::Script::new(DECREMENT_IF_POSITIVE_SCRIPT)
            .key(&full_key)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        let outcome = if result < 0 {
            DecrementOutcome::Insufficient
        } else {
            DecrementOutcome::Decremented {
                remaining: result as u64,
            }
        };
        debug!(key, ?outcome, "Counter decrement via Redis");
        Ok(outcome)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}

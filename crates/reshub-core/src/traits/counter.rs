//! Counter store trait for pluggable key-value backends.

use async_trait::async_trait;

use crate::result::AppResult;

/// Result of an atomic decrement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// The counter was positive and has been decremented.
    Decremented {
        /// Value after the decrement.
        remaining: u64,
    },
    /// The counter was zero or absent; nothing changed.
    Insufficient,
}

impl DecrementOutcome {
    /// Whether this decrement drained the counter.
    pub fn exhausted(&self) -> bool {
        matches!(self, Self::Decremented { remaining: 0 } | Self::Insufficient)
    }
}

/// Trait for integer counter backends (Redis or in-memory).
///
/// Counters are only ever mutated through [`CounterStore::decrement_if_positive`]
/// once seeded. Implementations must make that call indivisible with respect
/// to every other caller sharing the backend.
#[async_trait]
pub trait CounterStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get the current value. Returns `None` if the key was never set.
    async fn get(&self, key: &str) -> AppResult<Option<u64>>;

    /// Unconditionally overwrite a counter. Used for seeding only.
    async fn set(&self, key: &str, value: u64) -> AppResult<()>;

    /// Decrement by one if and only if the current value is strictly positive.
    async fn decrement_if_positive(&self, key: &str) -> AppResult<DecrementOutcome>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

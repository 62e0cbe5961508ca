//! # reshub-cache
//!
//! Counter store implementations for ResHub. Supports two modes:
//!
//! - **memory**: In-process counters in a [dashmap](https://crates.io/crates/dashmap)
//! - **redis**: Redis-backed counters using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CounterStoreManager;

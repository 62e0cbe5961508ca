//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section carries serde defaults so an empty
//! configuration is a valid one.

pub mod app;
pub mod inventory;
pub mod logging;
pub mod store;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::inventory::InventoryConfig;
pub use self::logging::LoggingConfig;
pub use self::store::{MemoryStoreConfig, RedisStoreConfig, StoreConfig};
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Counter store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Reservation worker and queue settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Seat count and product catalog.
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `RESHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("RESHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.worker.queue_capacity == 0 {
            return Err(AppError::configuration(
                "worker.queue_capacity must be greater than zero",
            ));
        }
        if self.worker.job_retention == 0 {
            return Err(AppError::configuration(
                "worker.job_retention must be greater than zero",
            ));
        }
        self.inventory.validate()
    }
}

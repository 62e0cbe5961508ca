//! # reshub-core
//!
//! Core crate for ResHub. Contains the counter store trait, configuration
//! schemas, the product catalog types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ResHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

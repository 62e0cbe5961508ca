//! Unified application error types for ResHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource (catalog item, job) was not found.
    NotFound,
    /// An illegal state transition was attempted.
    Conflict,
    /// The counter store backend could not be reached or failed.
    StoreUnavailable,
    /// A counter was already at zero.
    InsufficientResource,
    /// The job queue rejected a new job.
    QueueEnqueue,
    /// A second processor was registered for a job type.
    DuplicateProcessor,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
            Self::InsufficientResource => write!(f, "INSUFFICIENT_RESOURCE"),
            Self::QueueEnqueue => write!(f, "QUEUE_ENQUEUE"),
            Self::DuplicateProcessor => write!(f, "DUPLICATE_PROCESSOR"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout ResHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a store-unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreUnavailable, message)
    }

    /// Create an insufficient-resource error.
    pub fn insufficient_resource(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InsufficientResource, message)
    }

    /// Create a queue-enqueue error.
    pub fn queue_enqueue(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::QueueEnqueue, message)
    }

    /// Create a duplicate-processor error.
    pub fn duplicate_processor(job_type: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateProcessor,
            format!("A processor is already registered for job type '{job_type}'"),
        )
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the error is a backend failure rather than a business outcome.
    pub fn is_store_failure(&self) -> bool {
        self.kind == ErrorKind::StoreUnavailable
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::queue_enqueue("lane 'reserve_seat' is full");
        assert_eq!(err.to_string(), "QUEUE_ENQUEUE: lane 'reserve_seat' is full");
    }

    #[test]
    fn test_duplicate_processor_names_job_type() {
        let err = AppError::duplicate_processor("reserve_seat");
        assert_eq!(err.kind, ErrorKind::DuplicateProcessor);
        assert!(err.message.contains("reserve_seat"));
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("connection reset");
        let err = AppError::with_source(ErrorKind::StoreUnavailable, "Redis error", io);
        assert!(err.source.is_some());
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert!(cloned.is_store_failure());
    }
}

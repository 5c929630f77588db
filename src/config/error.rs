//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Confidence value '{0}' must be between 0.0 and 1.0")]
    ConfidenceOutOfRange(&'static str),

    #[error("Cautious threshold must be below the aggressive threshold")]
    ThresholdsOutOfOrder,

    #[error("Floor confidence must not exceed the cautious threshold")]
    FloorAboveCautious,

    #[error("Turn limits must be greater than zero")]
    InvalidTurnLimit,

    #[error("Session duration limit must be greater than zero")]
    InvalidDurationLimit,

    #[error("Stale turn limit must be greater than zero")]
    InvalidStaleLimit,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Classifier endpoint must be an http(s) URL")]
    InvalidClassifierEndpoint,
}

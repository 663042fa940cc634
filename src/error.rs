//! Error types for Sprout.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Matching error: {0}")]
    Match(#[from] MatchError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: std::path::PathBuf },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Profile store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Profile not found: {id}")]
    NotFound { id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Input-absence failures of the matching core.
///
/// Disqualification is not represented here: a disqualified pair is a valid
/// [`MatchResult`](crate::scoring::MatchResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("User profile not found: {id}")]
    TargetNotFound { id: String },

    #[error("Need at least 2 profiles for pairing, got {size}")]
    PoolTooSmall { size: usize },

    #[error("Pool of {size} profiles is too large for exact pairing (max {max})")]
    PoolTooLargeForExact { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

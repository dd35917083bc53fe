//! Error types for the thread-backed generator engine.

use thiserror::Error;

/// Errors raised while standing up a generator engine.
///
/// The hand-off protocol itself is infallible; only construction can fail.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to spawn generator worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Invalid engine configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Worker thread name must be non-empty")]
    EmptyThreadName,

    #[error("Worker thread name may not contain interior nul bytes")]
    ThreadNameInteriorNul,

    #[error("Invalid log format: {0} (must be 'json' or 'text')")]
    InvalidLogFormat(String),

    #[error("Invalid log output: {0} (must be 'stdout' or 'stderr')")]
    InvalidLogOutput(String),

    #[error("Invalid log directive: {0}")]
    InvalidLogDirective(String),
}

use thiserror::Error;

/// Custom error types for postdraft
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Invalid config file {path}: {message}")]
    InvalidConfig { path: String, message: String },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to serialize draft: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;

//! Store error types.

use followscope_core::CoreError;
use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No API credential is configured.
    #[error("GitHub token not found; set GITHUB_TOKEN in the environment or a .env file")]
    MissingCredential,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The settings file could not be parsed.
    #[error("Settings file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The destination table is malformed.
    #[error("Table error: {0}")]
    Csv(#[from] csv::Error),

    /// A table row could not be decoded.
    #[error("Invalid row: {0}")]
    InvalidRecord(#[from] CoreError),
}


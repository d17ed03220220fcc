//! Core error types for Followscope.

use thiserror::Error;

/// Core error type for Followscope operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A login was empty or would not form a single path segment.
    #[error("Invalid login: {0:?}")]
    InvalidLogin(String),

    /// An export row could not be decoded.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

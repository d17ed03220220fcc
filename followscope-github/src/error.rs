//! GitHub query errors.

use followscope_core::CoreError;
use followscope_fetch::FetchError;
use thiserror::Error;

/// Errors raised while querying the GitHub API.
///
/// These never leave the [`AccountSource`](followscope_core::AccountSource)
/// boundary; they are logged and turned into empty or missing results.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The fetcher gave up.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The payload did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The configured API base cannot carry path segments.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The login is not a valid path segment.
    #[error(transparent)]
    InvalidLogin(#[from] CoreError),
}

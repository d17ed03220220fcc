//! Account types returned by the platform API.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Account Reference
// ============================================================================

/// A followed account as returned by the following-list endpoint.
///
/// Only `login` and `html_url` are guaranteed; the remaining fields are
/// carried when present so JSON output stays informative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    /// Unique login identifier.
    pub login: String,

    /// Public profile URL.
    pub html_url: String,

    /// Numeric account ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl AccountRef {
    /// Creates an account reference with only the required fields.
    pub fn new(login: impl Into<String>, html_url: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            html_url: html_url.into(),
            id: None,
            avatar_url: None,
        }
    }
}

// ============================================================================
// Follower Count
// ============================================================================

/// Follower count attached to one login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerCount(pub u64);

impl FollowerCount {
    /// Returns the raw count.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FollowerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Login Validation
// ============================================================================

/// Checks that a login is usable as a single path segment.
///
/// Only logins that would change the request path are rejected: empty
/// logins, dot segments and anything containing `/`. Every other character
/// is escaped when the endpoint is built, so platform logins such as
/// `mona_octocorp` or legacy `trail-` pass unchanged.
pub fn validate_login(login: &str) -> Result<&str, CoreError> {
    let valid = !login.is_empty() && login != "." && login != ".." && !login.contains('/');

    if valid {
        Ok(login)
    } else {
        Err(CoreError::InvalidLogin(login.to_string()))
    }
}

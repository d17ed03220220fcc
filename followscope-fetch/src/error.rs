//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A single attempt was rate limited. Retryable.
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Message reported by the API.
        message: String,
    },

    /// Every attempt allowed by the retry policy was rate limited.
    #[error("Rate limit exceeded, gave up after {attempts} attempts")]
    RateLimitExhausted {
        /// Number of attempts made.
        attempts: u32,
    },

    /// The API answered with a non-success status.
    #[error("Request failed with HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message reported by the API.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A success response did not carry valid JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

// ============================================================================
// Transport Error
// ============================================================================

/// Network-level failure below HTTP.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Request timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Any other failure while sending or reading the response.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = FetchError::RateLimitExhausted { attempts: 5 };
        assert_eq!(err.to_string(), "Rate limit exceeded, gave up after 5 attempts");

        let err = FetchError::Http { status: 404, message: "Not Found".into() };
        assert_eq!(err.to_string(), "Request failed with HTTP 404: Not Found");
    }
}

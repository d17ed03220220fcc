//! HTTP transport.
//!
//! [`Transport`] sends a single GET and hands back the raw status and body.
//! It never interprets the status; classification and retries live in the
//! fetcher. [`HttpTransport`] is the reqwest-backed implementation.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderMap};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{FetchError, TransportError};

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for Followscope.
const USER_AGENT: &str = concat!("followscope/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Transport Trait
// ============================================================================

/// Status and body of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Creates a raw response.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends GET requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request with the given headers.
    async fn get(&self, url: &Url, headers: HeaderMap) -> Result<RawResponse, TransportError>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// reqwest-backed transport with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Creates a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { inner: client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, headers), fields(url = %url))]
    async fn get(&self, url: &Url, headers: HeaderMap) -> Result<RawResponse, TransportError> {
        debug!("GET request");

        let response = self.inner.get(url.clone()).headers(headers).send().await?;
        let status = response.status();
        debug!(status = %status, "Response received");

        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_builds_with_custom_timeout() {
        assert!(HttpTransport::with_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_user_agent_carries_version() {
        assert!(USER_AGENT.starts_with("followscope/"));
        assert!(USER_AGENT.len() > "followscope/".len());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let transport = HttpTransport::with_timeout(Duration::from_secs(2)).unwrap();
        // Port 9 (discard) on localhost is closed on any sane test machine.
        let url = Url::parse("http://127.0.0.1:9/users/a").unwrap();

        let result = transport.get(&url, HeaderMap::new()).await;
        assert!(matches!(
            result,
            Err(TransportError::Connect(_) | TransportError::Timeout(_) | TransportError::Other(_))
        ));
    }
}

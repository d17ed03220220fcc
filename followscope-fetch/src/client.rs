//! Resilient JSON fetcher.
//!
//! [`Fetcher::fetch`] issues a GET, classifies the response into an
//! [`AttemptOutcome`], and walks a [`RetryState`] until the outcome is
//! terminal:
//!
//! | Response | Outcome |
//! |----------|---------|
//! | 2xx with JSON body | `Success` |
//! | 403 mentioning a rate limit | `Retryable` (backoff, then retry) |
//! | any other status | `Fatal` (`FetchError::Http`) |
//! | no response | `Fatal` (`FetchError::Transport`) |
//!
//! Every attempt that ends the call is followed by the policy's courtesy
//! pause.

use followscope_core::Credential;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::context::FetchSettings;
use crate::error::FetchError;
use crate::host::{HttpTransport, Pause, RawResponse, Sleeper, TokioSleeper, Transport};
use crate::retry::{RetryPolicy, RetryState};

/// Media type requested from the API.
const ACCEPT_VALUE: &str = "application/vnd.github+json";

/// API version header.
const API_VERSION_HEADER: &str = "x-github-api-version";

/// API version requested.
const API_VERSION: &str = "2022-11-28";

/// Longest error message kept from a response body.
const MAX_MESSAGE_LEN: usize = 200;

// ============================================================================
// Attempt Outcome
// ============================================================================

/// Classification of a single attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The request succeeded and the body parsed.
    Success(Value),
    /// The request failed in a way another attempt may fix.
    Retryable(FetchError),
    /// The request failed for good.
    Fatal(FetchError),
}

impl AttemptOutcome {
    /// Classifies an HTTP response.
    pub fn classify(response: RawResponse) -> Self {
        if response.status.is_success() {
            return match serde_json::from_str(&response.body) {
                Ok(value) => Self::Success(value),
                Err(e) => Self::Fatal(FetchError::Decode(e.to_string())),
            };
        }

        let message = error_message(&response.body);

        if response.status == StatusCode::FORBIDDEN && is_rate_limit_message(&message) {
            return Self::Retryable(FetchError::RateLimited { message });
        }

        Self::Fatal(FetchError::Http {
            status: response.status.as_u16(),
            message,
        })
    }
}

/// Extracts a human-readable message from an error body.
///
/// The API reports errors as `{"message": "..."}`; anything else is used
/// verbatim, trimmed and truncated.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));

    let message = from_json.unwrap_or_else(|| body.trim().to_string());
    match message.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((idx, _)) => format!("{}...", &message[..idx]),
        None => message,
    }
}

/// Returns true if an error message signals a rate limit.
pub fn is_rate_limit_message(message: &str) -> bool {
    message.to_lowercase().contains("rate limit")
}

// ============================================================================
// Fetcher
// ============================================================================

/// Fetches JSON with rate-limit retries.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Creates a fetcher with the reqwest transport and tokio timer.
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let transport = HttpTransport::with_timeout(settings.timeout)?;
        Ok(Self::with_parts(
            Arc::new(transport),
            Arc::new(TokioSleeper),
            settings.retry.clone(),
        ))
    }

    /// Creates a fetcher from explicit parts.
    pub fn with_parts(
        transport: Arc<dyn Transport>,
        sleeper: Arc<dyn Sleeper>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            sleeper,
            policy,
        }
    }

    /// Fetches `endpoint` with `query` appended and returns the parsed body.
    ///
    /// The credential, when present, is sent as a bearer token.
    #[instrument(skip(self, endpoint, query, credential), fields(url = %endpoint))]
    pub async fn fetch(
        &self,
        endpoint: &Url,
        query: &[(&str, String)],
        credential: Option<&Credential>,
    ) -> Result<Value, FetchError> {
        let url = with_query(endpoint, query);
        let headers = request_headers(credential)?;
        let mut state = RetryState::start(&self.policy);

        loop {
            debug!(attempt = state.attempts_made(), "Making GET request");

            let outcome = match self.transport.get(&url, headers.clone()).await {
                Ok(response) => AttemptOutcome::classify(response),
                Err(e) => AttemptOutcome::Fatal(FetchError::Transport(e)),
            };

            match outcome {
                AttemptOutcome::Success(value) => {
                    self.courtesy_pause().await;
                    return Ok(value);
                }
                AttemptOutcome::Fatal(error) => {
                    warn!(error = %error, "Request failed");
                    self.courtesy_pause().await;
                    return Err(error);
                }
                AttemptOutcome::Retryable(error) => match state.advance(&self.policy) {
                    Some(delay) => {
                        warn!(
                            error = %error,
                            delay_secs = delay.as_secs_f64(),
                            "Rate limit exceeded, retrying"
                        );
                        self.sleeper.pause(Pause::Backoff(delay)).await;
                    }
                    None => {
                        let attempts = state.attempts_made();
                        warn!(attempts, "Rate limit exceeded, max retries reached");
                        self.courtesy_pause().await;
                        return Err(FetchError::RateLimitExhausted { attempts });
                    }
                },
            }
        }
    }

    async fn courtesy_pause(&self) {
        self.sleeper
            .pause(Pause::Courtesy(self.policy.courtesy_delay))
            .await;
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Appends query parameters to an endpoint.
fn with_query(endpoint: &Url, query: &[(&str, String)]) -> Url {
    let mut url = endpoint.clone();
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    url
}

/// Builds the headers sent with every attempt.
fn request_headers(credential: Option<&Credential>) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(
        HeaderName::from_static(API_VERSION_HEADER),
        HeaderValue::from_static(API_VERSION),
    );

    if let Some(credential) = credential {
        let mut value = HeaderValue::from_str(&credential.bearer_header())
            .map_err(|_| FetchError::Client("credential is not a valid header value".into()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

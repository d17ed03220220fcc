//! Fetcher retry and classification tests.
//!
//! Responses come from a scripted transport and pauses are recorded, so
//! these tests exercise the full retry loop without network or sleeping.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use followscope_core::Credential;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use url::Url;

use crate::client::Fetcher;
use crate::error::{FetchError, TransportError};
use crate::host::{Pause, RawResponse, Sleeper, Transport};
use crate::retry::RetryPolicy;

// ============================================================================
// Test Doubles
// ============================================================================

type Scripted = Result<RawResponse, TransportError>;

/// Replays scripted responses; repeats the last one when the script runs out.
#[derive(Default)]
struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<(Url, HeaderMap)>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last_request(&self) -> (Url, HeaderMap) {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

fn clone_scripted(entry: &Scripted) -> Scripted {
    match entry {
        Ok(response) => Ok(response.clone()),
        Err(TransportError::Connect(m)) => Err(TransportError::Connect(m.clone())),
        Err(TransportError::Timeout(m)) => Err(TransportError::Timeout(m.clone())),
        Err(TransportError::Other(m)) => Err(TransportError::Other(m.clone())),
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &Url, headers: HeaderMap) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push((url.clone(), headers));
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            clone_scripted(script.front().unwrap())
        }
    }
}

#[derive(Default)]
struct RecordingSleeper {
    pauses: Mutex<Vec<Pause>>,
}

impl RecordingSleeper {
    fn backoffs(&self) -> Vec<Duration> {
        self.pauses
            .lock()
            .unwrap()
            .iter()
            .filter_map(|p| match p {
                Pause::Backoff(d) => Some(*d),
                Pause::Courtesy(_) => None,
            })
            .collect()
    }

    fn courtesy_count(&self) -> usize {
        self.pauses
            .lock()
            .unwrap()
            .iter()
            .filter(|p| matches!(p, Pause::Courtesy(_)))
            .count()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn pause(&self, pause: Pause) {
        self.pauses.lock().unwrap().push(pause);
    }
}

fn fetcher(transport: &Arc<ScriptedTransport>, sleeper: &Arc<RecordingSleeper>) -> Fetcher {
    Fetcher::with_parts(transport.clone(), sleeper.clone(), RetryPolicy::default())
}

fn endpoint() -> Url {
    Url::parse("https://api.github.com/users/octocat").unwrap()
}

fn ok(body: &str) -> Scripted {
    Ok(RawResponse::new(StatusCode::OK, body))
}

fn rate_limited() -> Scripted {
    Ok(RawResponse::new(
        StatusCode::FORBIDDEN,
        r#"{"message":"API rate limit exceeded for user ID 1.","documentation_url":"https://docs.github.com"}"#,
    ))
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn test_success_returns_parsed_body() {
    let transport = ScriptedTransport::new(vec![ok(r#"{"login":"octocat","followers":42}"#)]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let value = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await
        .unwrap();

    assert_eq!(value["followers"], 42);
    assert_eq!(transport.calls(), 1);
    assert!(sleeper.backoffs().is_empty());
    assert_eq!(sleeper.courtesy_count(), 1);
}

#[tokio::test]
async fn test_query_and_credential_are_sent() {
    let transport = ScriptedTransport::new(vec![ok("[]")]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let credential = Credential::new("ghp_token");

    fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[("per_page", "7".to_string())], Some(&credential))
        .await
        .unwrap();

    let (url, headers) = transport.last_request();
    assert_eq!(url.query(), Some("per_page=7"));
    assert_eq!(headers[AUTHORIZATION], "Bearer ghp_token");
}

#[tokio::test]
async fn test_no_credential_no_authorization_header() {
    let transport = ScriptedTransport::new(vec![ok("{}")]);
    let sleeper = Arc::new(RecordingSleeper::default());

    fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await
        .unwrap();

    let (_, headers) = transport.last_request();
    assert!(headers.get(AUTHORIZATION).is_none());
}

// ============================================================================
// Rate Limit Retries
// ============================================================================

#[tokio::test]
async fn test_persistent_rate_limit_exhausts_after_five_attempts() {
    let transport = ScriptedTransport::new(vec![rate_limited()]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let result = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await;

    assert!(matches!(result, Err(FetchError::RateLimitExhausted { attempts: 5 })));
    assert_eq!(transport.calls(), 5);
}

#[tokio::test]
async fn test_backoff_schedule_doubles_from_one_second() {
    let transport = ScriptedTransport::new(vec![rate_limited()]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let _ = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await;

    let expected: Vec<Duration> = [1, 2, 4, 8].into_iter().map(Duration::from_secs).collect();
    assert_eq!(sleeper.backoffs(), expected);
    assert_eq!(sleeper.courtesy_count(), 1);
}

#[tokio::test]
async fn test_rate_limit_then_success_recovers() {
    let transport = ScriptedTransport::new(vec![
        rate_limited(),
        rate_limited(),
        ok(r#"[{"login":"a","html_url":"https://github.com/a"}]"#),
    ]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let value = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await
        .unwrap();

    assert_eq!(value[0]["login"], "a");
    assert_eq!(transport.calls(), 3);
    assert_eq!(
        sleeper.backoffs(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn test_custom_attempt_cap_is_honoured() {
    let transport = ScriptedTransport::new(vec![rate_limited()]);
    let sleeper = Arc::new(RecordingSleeper::default());
    let fetcher = Fetcher::with_parts(transport.clone(), sleeper.clone(), RetryPolicy::new(2));

    let result = fetcher.fetch(&endpoint(), &[], None).await;

    assert!(matches!(result, Err(FetchError::RateLimitExhausted { attempts: 2 })));
    assert_eq!(transport.calls(), 2);
    assert_eq!(sleeper.backoffs(), vec![Duration::from_secs(1)]);
}

// ============================================================================
// Non-Retried Failures
// ============================================================================

#[tokio::test]
async fn test_not_found_short_circuits() {
    let transport = ScriptedTransport::new(vec![Ok(RawResponse::new(
        StatusCode::NOT_FOUND,
        r#"{"message":"Not Found"}"#,
    ))]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let result = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await;

    match result {
        Err(FetchError::Http { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
    assert_eq!(transport.calls(), 1);
    assert!(sleeper.backoffs().is_empty());
    assert_eq!(sleeper.courtesy_count(), 1);
}

#[tokio::test]
async fn test_forbidden_without_rate_limit_is_not_retried() {
    let transport = ScriptedTransport::new(vec![Ok(RawResponse::new(
        StatusCode::FORBIDDEN,
        r#"{"message":"Resource not accessible by personal access token"}"#,
    ))]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let result = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await;

    assert!(matches!(result, Err(FetchError::Http { status: 403, .. })));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_too_many_requests_is_not_retried() {
    let transport = ScriptedTransport::new(vec![Ok(RawResponse::new(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"message":"API rate limit exceeded"}"#,
    ))]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let result = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await;

    assert!(matches!(result, Err(FetchError::Http { status: 429, .. })));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_server_error_short_circuits() {
    let transport = ScriptedTransport::new(vec![
        Ok(RawResponse::new(StatusCode::BAD_GATEWAY, "upstream down")),
        ok("{}"),
    ]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let result = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await;

    assert!(matches!(result, Err(FetchError::Http { status: 502, .. })));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_transport_failure_short_circuits() {
    let transport = ScriptedTransport::new(vec![
        Err(TransportError::Timeout("deadline elapsed".into())),
        ok("{}"),
    ]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let result = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await;

    assert!(matches!(
        result,
        Err(FetchError::Transport(TransportError::Timeout(_)))
    ));
    assert_eq!(transport.calls(), 1);
    assert_eq!(sleeper.courtesy_count(), 1);
}

#[tokio::test]
async fn test_rate_limit_then_hard_error_stops() {
    let transport = ScriptedTransport::new(vec![
        rate_limited(),
        Ok(RawResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "")),
        ok("{}"),
    ]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let result = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await;

    assert!(matches!(result, Err(FetchError::Http { status: 500, .. })));
    assert_eq!(transport.calls(), 2);
    assert_eq!(sleeper.backoffs(), vec![Duration::from_secs(1)]);
}

#[tokio::test]
async fn test_success_with_invalid_json_is_decode_error() {
    let transport = ScriptedTransport::new(vec![ok("not json")]);
    let sleeper = Arc::new(RecordingSleeper::default());

    let result = fetcher(&transport, &sleeper)
        .fetch(&endpoint(), &[], None)
        .await;

    assert!(matches!(result, Err(FetchError::Decode(_))));
    assert_eq!(transport.calls(), 1);
}

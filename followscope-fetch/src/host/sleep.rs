//! Pauses between attempts.

use async_trait::async_trait;
use std::time::Duration;

/// A pause the fetcher asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Exponential backoff before retrying a rate-limited request.
    Backoff(Duration),
    /// Fixed pause after an attempt that ended the call.
    Courtesy(Duration),
}

impl Pause {
    /// Returns how long to wait.
    pub fn duration(self) -> Duration {
        match self {
            Self::Backoff(d) | Self::Courtesy(d) => d,
        }
    }
}

/// Waits for a [`Pause`].
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends the caller for the pause duration.
    async fn pause(&self, pause: Pause);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn pause(&self, pause: Pause) {
        let duration = pause.duration();
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

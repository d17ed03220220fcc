// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Followscope Fetch
//!
//! Rate-limit aware HTTP fetching for the Followscope tool.
//!
//! ## Host APIs
//!
//! The [`host`] module provides the seams to the outside world:
//!
//! - [`host::http`] - HTTP transport (reqwest) with a per-request timeout
//! - [`host::sleep`] - Backoff and courtesy pauses (tokio timer)
//!
//! ## Fetcher
//!
//! - [`client::Fetcher`] - GET with response classification and retries
//! - [`client::AttemptOutcome`] - Tagged result of a single attempt
//! - [`retry::RetryPolicy`] / [`retry::RetryState`] - Backoff schedule
//!
//! ## Example
//!
//! ```ignore
//! use followscope_fetch::{FetchSettings, Fetcher};
//!
//! let fetcher = Fetcher::new(&FetchSettings::default())?;
//! let url = url::Url::parse("https://api.github.com/users/octocat")?;
//! let profile = fetcher.fetch(&url, &[], Some(&credential)).await?;
//! ```

pub mod client;
pub mod context;
pub mod error;
pub mod host;
pub mod retry;

// Re-export key types at crate root
pub use client::{AttemptOutcome, Fetcher, is_rate_limit_message};
pub use context::FetchSettings;
pub use error::{FetchError, TransportError};
pub use host::{HttpTransport, Pause, RawResponse, Sleeper, TokioSleeper, Transport};
pub use retry::{RetryPolicy, RetryState};

#[cfg(test)]
mod client_tests;

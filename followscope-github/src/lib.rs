// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Followscope GitHub
//!
//! Account queries against the GitHub REST API.
//!
//! [`GitHubClient`] answers the two questions the report needs:
//!
//! | Query | Endpoint | Failure result |
//! |-------|----------|----------------|
//! | accounts followed by X | `GET /users/{login}/following?per_page=N` | empty list |
//! | follower count of Y | `GET /users/{login}` | `None` |
//!
//! Through [`AccountSource`](followscope_core::AccountSource) every failure
//! is absorbed and logged; the `fetch_*` methods expose the underlying
//! [`GitHubError`] for callers that want it.
//!
//! ## Usage
//!
//! ```ignore
//! use followscope_core::AccountSource;
//! use followscope_fetch::{FetchSettings, Fetcher};
//! use followscope_github::GitHubClient;
//!
//! let fetcher = Fetcher::new(&FetchSettings::default())?;
//! let client = GitHubClient::public(fetcher, Some(credential))?;
//! let following = client.list_following("octocat", 100).await;
//! ```

pub mod api;
pub mod error;
pub mod parser;

pub use api::{GITHUB_API_BASE, GitHubClient};
pub use error::GitHubError;

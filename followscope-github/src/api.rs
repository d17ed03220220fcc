//! GitHub API client.
//!
//! Translates the two account queries into REST calls through the
//! resilient [`Fetcher`] and the responses into domain records.

use async_trait::async_trait;
use followscope_core::{AccountRef, AccountSource, Credential, FollowerCount, validate_login};
use followscope_fetch::Fetcher;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::GitHubError;
use crate::parser::{parse_follower_count, parse_following};

// ============================================================================
// Constants
// ============================================================================

/// GitHub API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Path segment for user resources.
const USERS_SEGMENT: &str = "users";

/// Path segment for the following list of a user.
const FOLLOWING_SEGMENT: &str = "following";

// ============================================================================
// API Client
// ============================================================================

/// GitHub account query client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    fetcher: Fetcher,
    base_url: Url,
    credential: Option<Credential>,
}

impl GitHubClient {
    /// Creates a client against `base_url`.
    pub fn new(
        fetcher: Fetcher,
        base_url: &str,
        credential: Option<Credential>,
    ) -> Result<Self, GitHubError> {
        let base_url =
            Url::parse(base_url).map_err(|e| GitHubError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GitHubError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            fetcher,
            base_url,
            credential,
        })
    }

    /// Creates a client against the public GitHub API.
    pub fn public(fetcher: Fetcher, credential: Option<Credential>) -> Result<Self, GitHubError> {
        Self::new(fetcher, GITHUB_API_BASE, credential)
    }

    /// Builds `{base}/users/{login}[/{suffix}]` with the login escaped.
    fn user_endpoint(&self, login: &str, suffix: Option<&str>) -> Result<Url, GitHubError> {
        validate_login(login)?;

        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| GitHubError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(USERS_SEGMENT).push(login);
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        Ok(url)
    }

    /// Fetches up to `max_count` accounts followed by `login`.
    #[instrument(skip(self))]
    pub async fn fetch_following(
        &self,
        login: &str,
        max_count: u32,
    ) -> Result<Vec<AccountRef>, GitHubError> {
        let url = self.user_endpoint(login, Some(FOLLOWING_SEGMENT))?;
        let query = [("per_page", max_count.to_string())];

        let value = self
            .fetcher
            .fetch(&url, &query, self.credential.as_ref())
            .await?;
        let accounts = parse_following(value, max_count)?;

        debug!(count = accounts.len(), "Fetched following list");
        Ok(accounts)
    }

    /// Fetches the follower count of `login`.
    #[instrument(skip(self))]
    pub async fn fetch_follower_count(&self, login: &str) -> Result<FollowerCount, GitHubError> {
        let url = self.user_endpoint(login, None)?;

        let value = self
            .fetcher
            .fetch(&url, &[], self.credential.as_ref())
            .await?;
        let count = parse_follower_count(value)?;

        debug!(followers = count.get(), "Fetched follower count");
        Ok(count)
    }
}

#[async_trait]
impl AccountSource for GitHubClient {
    async fn list_following(&self, login: &str, max_count: u32) -> Vec<AccountRef> {
        match self.fetch_following(login, max_count).await {
            Ok(accounts) if accounts.is_empty() => {
                warn!(login, "No following accounts found");
                accounts
            }
            Ok(accounts) => accounts,
            Err(e) => {
                warn!(login, error = %e, "Unable to fetch following list");
                Vec::new()
            }
        }
    }

    async fn follower_count(&self, login: &str) -> Option<FollowerCount> {
        match self.fetch_follower_count(login).await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(login, error = %e, "Unable to fetch follower count");
                None
            }
        }
    }
}

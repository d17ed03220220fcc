//! GitHub response parsers.

use followscope_core::{AccountRef, FollowerCount};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::GitHubError;

/// The part of a user profile this tool reads.
#[derive(Debug, Deserialize)]
struct UserProfile {
    followers: Option<u64>,
}

/// Parses a following-list payload, keeping at most `max_count` entries.
pub fn parse_following(value: Value, max_count: u32) -> Result<Vec<AccountRef>, GitHubError> {
    let mut accounts: Vec<AccountRef> = serde_json::from_value(value)
        .map_err(|e| GitHubError::InvalidResponse(format!("following list: {e}")))?;

    let limit = usize::try_from(max_count).unwrap_or(usize::MAX);
    if accounts.len() > limit {
        debug!(returned = accounts.len(), limit, "Truncating following list");
        accounts.truncate(limit);
    }

    Ok(accounts)
}

/// Parses the follower count out of a user profile payload.
pub fn parse_follower_count(value: Value) -> Result<FollowerCount, GitHubError> {
    let profile: UserProfile = serde_json::from_value(value)
        .map_err(|e| GitHubError::InvalidResponse(format!("user profile: {e}")))?;

    profile
        .followers
        .map(FollowerCount)
        .ok_or_else(|| GitHubError::InvalidResponse("user profile has no followers field".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account(login: &str) -> Value {
        json!({"login": login, "html_url": format!("https://github.com/{login}"), "id": 1})
    }

    #[test]
    fn test_parse_following_preserves_order() {
        let value = json!([account("zed"), account("alice"), account("mona")]);
        let logins: Vec<_> = parse_following(value, 100)
            .unwrap()
            .into_iter()
            .map(|a| a.login)
            .collect();
        assert_eq!(logins, vec!["zed", "alice", "mona"]);
    }

    #[test]
    fn test_parse_following_truncates_to_max_count() {
        let value = json!([account("a"), account("b"), account("c")]);
        let accounts = parse_following(value, 2).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].login, "b");
    }

    #[test]
    fn test_parse_following_empty() {
        assert!(parse_following(json!([]), 10).unwrap().is_empty());
    }

    #[test]
    fn test_parse_following_rejects_object() {
        let result = parse_following(json!({"message": "Not Found"}), 10);
        assert!(matches!(result, Err(GitHubError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_follower_count() {
        let value = json!({"login": "octocat", "followers": 9001, "following": 9});
        assert_eq!(parse_follower_count(value).unwrap(), FollowerCount(9001));
    }

    #[test]
    fn test_parse_follower_count_missing_or_invalid() {
        assert!(parse_follower_count(json!({"login": "octocat"})).is_err());
        assert!(parse_follower_count(json!({"followers": null})).is_err());
        assert!(parse_follower_count(json!({"followers": -1})).is_err());
        assert!(parse_follower_count(json!([])).is_err());
    }
}

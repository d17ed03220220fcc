//! Rows of the destination table.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One row of the destination table.
///
/// The login is the dedup key: a table never holds two rows with the same
/// login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Login of the followed account.
    pub login: String,
    /// Follower count of the followed account.
    pub followers: u64,
    /// Login whose following list produced this row.
    pub source_login: String,
}

impl ExportRecord {
    /// Column names of the destination table, in order.
    pub const HEADER: [&'static str; 3] = ["Account", "Followers", "Following"];

    /// Creates a new record.
    pub fn new(login: impl Into<String>, followers: u64, source_login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            followers,
            source_login: source_login.into(),
        }
    }

    /// Returns the record as table fields, in header order.
    pub fn to_fields(&self) -> [String; 3] {
        [
            self.login.clone(),
            self.followers.to_string(),
            self.source_login.clone(),
        ]
    }

    /// Parses a record from table fields.
    pub fn from_fields(fields: &[&str]) -> Result<Self, CoreError> {
        let [login, followers, source_login] = fields else {
            return Err(CoreError::InvalidRecord(format!(
                "expected 3 fields, found {}",
                fields.len()
            )));
        };

        let followers = followers
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidRecord(format!("bad follower count {followers:?}")))?;

        Ok(Self::new(*login, followers, *source_login))
    }
}

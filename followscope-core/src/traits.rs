//! Trait definitions for Followscope.
//!
//! The report orchestrator only sees account data through [`AccountSource`],
//! so it can be driven by the live API client or by an in-memory double.

use async_trait::async_trait;

use crate::models::{AccountRef, FollowerCount};

/// A source of follow-graph data.
///
/// Implementations absorb their own failures: a failed listing yields an
/// empty vector and a failed count lookup yields `None`. Callers never see
/// transport or HTTP errors.
#[async_trait]
pub trait AccountSource: Send + Sync {
    /// Returns up to `max_count` accounts followed by `login`, in the order
    /// the platform reports them.
    async fn list_following(&self, login: &str, max_count: u32) -> Vec<AccountRef>;

    /// Returns the follower count of `login`, or `None` if it could not be
    /// obtained.
    async fn follower_count(&self, login: &str) -> Option<FollowerCount>;
}

//! Domain models for Followscope.
//!
//! ## Submodules
//!
//! - [`account`] - Followed accounts and follower counts
//! - [`credential`] - Bearer credential
//! - [`export`] - Rows of the destination table

mod account;
mod credential;
mod export;

// Re-export everything at the models level
pub use account::{AccountRef, FollowerCount, validate_login};
pub use credential::Credential;
pub use export::ExportRecord;
#[cfg(test)]
mod serde_tests;

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Followscope Core
//!
//! Core types, models, and traits for the Followscope tool.
//!
//! This crate provides the foundational abstractions used across all other
//! Followscope crates:
//!
//! - Domain models (followed accounts, follower counts, export rows)
//! - The bearer [`Credential`] presented to the API
//! - Error types
//! - The [`AccountSource`] trait the report orchestrator is driven by
//!
//! ## Key Types
//!
//! - [`AccountRef`] - A followed account as returned by the API
//! - [`FollowerCount`] - Follower count attached to one login
//! - [`ExportRecord`] - One row of the destination table
//! - [`Credential`] - Opaque bearer token, redacted in debug output

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{AccountRef, Credential, ExportRecord, FollowerCount, validate_login};

// Re-export traits
pub use traits::AccountSource;

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Followscope Store
//!
//! Persistence and configuration for the Followscope tool.
//!
//! This crate provides:
//!
//! - **ExportTable**: the append-only CSV destination table, deduplicated
//!   by login
//! - **Settings**: credential and fetch settings from the environment and
//!   an optional `.env` file
//!
//! ## Usage
//!
//! ```ignore
//! use followscope_store::{ExportTable, Settings};
//!
//! let settings = Settings::load(None)?;
//! let credential = settings.require_credential()?;
//!
//! let table = ExportTable::default();
//! let seen = table.existing_logins().await?;
//! table.append(&new_rows).await?;
//! ```

pub mod error;
pub mod settings;
pub mod table;

pub use error::StoreError;
pub use settings::{API_URL_VAR, DEFAULT_API_URL, Settings, TIMEOUT_VAR, TOKEN_VAR};
pub use table::{DEFAULT_TABLE_PATH, ExportTable};

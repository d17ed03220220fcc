//! CLI command implementations.

pub mod following;

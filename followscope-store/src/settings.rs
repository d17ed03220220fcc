//! Settings loaded from the process environment.
//!
//! Values come from environment variables, optionally seeded from a
//! `.env` file. Variables already set in the process win over the file.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `GITHUB_TOKEN` | Bearer credential (required to run) | none |
//! | `GITHUB_API_URL` | API base URL | `https://api.github.com` |
//! | `FOLLOWSCOPE_TIMEOUT_SECS` | Per-request timeout | `30` |

use followscope_core::Credential;
use followscope_fetch::FetchSettings;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::StoreError;

/// Environment variable holding the API token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Environment variable overriding the API base URL.
pub const API_URL_VAR: &str = "GITHUB_API_URL";

/// Environment variable overriding the request timeout.
pub const TIMEOUT_VAR: &str = "FOLLOWSCOPE_TIMEOUT_SECS";

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Bearer credential, if configured.
    pub credential: Option<Credential>,
    /// API base URL.
    pub api_url: String,
    /// Fetch behaviour.
    pub fetch: FetchSettings,
    /// Whether a settings file was read.
    pub env_file_loaded: bool,
}

impl Settings {
    /// Loads settings from an optional `.env` file and the process
    /// environment.
    ///
    /// With `env_file = None`, a `.env` in the working directory or its
    /// ancestors is used if present. An explicitly named file must exist.
    pub fn load(env_file: Option<&Path>) -> Result<Self, StoreError> {
        let env_file_loaded = load_env_file(env_file)?;
        let mut settings = Self::from_lookup(|key| std::env::var(key).ok())?;
        settings.env_file_loaded = env_file_loaded;
        Ok(settings)
    }

    /// Builds settings from a variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = Credential::from_optional(lookup(TOKEN_VAR).as_deref());

        let api_url = lookup(API_URL_VAR)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut fetch = FetchSettings::default();
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    StoreError::Config(format!("{TIMEOUT_VAR} must be a positive integer, got {raw:?}"))
                })?;
            fetch = fetch.with_timeout(Duration::from_secs(secs));
        }

        debug!(
            has_credential = credential.is_some(),
            api_url = %api_url,
            timeout_secs = fetch.timeout.as_secs(),
            "Resolved settings"
        );

        Ok(Self {
            credential,
            api_url,
            fetch,
            env_file_loaded: false,
        })
    }

    /// Returns the credential or a configuration error.
    pub fn require_credential(&self) -> Result<&Credential, StoreError> {
        self.credential.as_ref().ok_or(StoreError::MissingCredential)
    }
}

/// Loads a `.env` file into the process environment.
///
/// Returns true if a file was read.
fn load_env_file(env_file: Option<&Path>) -> Result<bool, StoreError> {
    let loaded = match env_file {
        Some(path) => {
            if !path.exists() {
                return Err(StoreError::Config(format!(
                    "settings file not found: {}",
                    path.display()
                )));
            }
            dotenvy::from_path(path)?;
            true
        }
        None => dotenvy::dotenv().map(|_| true).or_else(|err| match err {
            dotenvy::Error::Io(_) => Ok(false),
            _ => Err(err),
        })?,
    };

    if loaded {
        info!("Loaded settings file");
    }
    Ok(loaded)
}

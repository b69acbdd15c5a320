//! Session layer configuration.
//!
//! All fields have working defaults; a deployment can override them via
//! a JSON config file (`SessionConfig::load`) or plain struct literals.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default base URL for the platform API.
pub const DEFAULT_BASE_URL: &str = "https://api.stafflink.app";

/// Lead time before hard expiry at which a token counts as due for
/// refresh (5 minutes). A token expiring inside this window is
/// refreshed before it is attached to a request.
const DEFAULT_REFRESH_THRESHOLD_SECS: i64 = 300;

/// Background refresh loop tick period (1 minute). Must stay well below
/// the access-token lifetime minus the refresh threshold.
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

/// Per-request timeout (30 seconds).
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the session client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Base URL of the platform API (auth and resource endpoints).
    pub base_url: String,
    /// Seconds before hard expiry to treat an access token as expired.
    pub refresh_threshold_secs: i64,
    /// Background refresh loop tick period, in seconds.
    pub refresh_interval_secs: u64,
    /// Per-request timeout, in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_threshold_secs: DEFAULT_REFRESH_THRESHOLD_SECS,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl SessionConfig {
    /// Default configuration pointed at a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed
    /// file is an error (silently ignoring a broken config hides
    /// misconfiguration).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// The per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

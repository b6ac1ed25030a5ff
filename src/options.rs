//! Client configuration for reaching the AutoCompChem server.

use std::time::Duration;

/// Environment variable holding the AutoCompChem server base URL.
pub const BASE_URL_ENV: &str = "AUTOCOMPCHEM_BASE_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "AUTOCOMPCHEM_TIMEOUT_SECS";

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Five minutes. Input generation and output parsing on the remote side can
/// take a long time for large jobs.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Options used to build the forwarding client.
///
/// Constructed once at startup and handed to
/// [`AutoCompChemClient`](crate::client::AutoCompChemClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Base URL of the AutoCompChem server, without a trailing slash.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientOptions {
    /// Create default options pointing at the local server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from `AUTOCOMPCHEM_BASE_URL` and `AUTOCOMPCHEM_TIMEOUT_SECS`.
    ///
    /// Unset variables fall back to the defaults. A timeout that does not
    /// parse as whole seconds is ignored with a warning.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            options = options.with_base_url(url);
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => options = options.with_timeout(Duration::from_secs(secs)),
                Err(e) => tracing::warn!("Ignoring {}={:?}: {}", TIMEOUT_ENV, raw, e),
            }
        }

        options
    }

    /// Set the base URL. Trailing slashes are trimmed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Join the base URL with an absolute endpoint path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

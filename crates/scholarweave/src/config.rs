//! Configuration for the ScholarWeave client.

use std::time::Duration;

use url::Url;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Default backend base URL (API v1 group).
    pub const BASE_URL: &str = "http://localhost:3000/api/v1";

    /// Request timeout applied to every backend call.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Health indicator polling interval.
    pub const HEALTH_INTERVAL: Duration = Duration::from_secs(30);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 4;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Environment variable names.
pub mod env {
    /// Backend base URL.
    pub const API_URL: &str = "SCHOLARWEAVE_API_URL";

    /// Request timeout in whole seconds.
    pub const TIMEOUT_SECS: &str = "SCHOLARWEAVE_TIMEOUT_SECS";
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without a trailing slash.
    pub api_base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Health polling interval.
    pub health_interval: Duration,
}

impl Config {
    /// Create a configuration for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the URL does not parse or is not http(s).
    pub fn new(api_base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
            ..Self::default()
        })
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_base_url: format!("{}/api/v1", base_url.trim_end_matches('/')),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            health_interval: Duration::from_millis(50),
        }
    }

    /// Create configuration from environment variables (and a `.env` file, if any).
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match std::env::var(env::API_URL) {
            Ok(url) => Self::new(&url)?,
            Err(_) => Self::default(),
        };

        if let Ok(secs) = std::env::var(env::TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid {}: {e}", env::TIMEOUT_SECS))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override the backend base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the URL does not parse or is not http(s).
    pub fn with_api_base_url(mut self, api_base_url: &str) -> anyhow::Result<Self> {
        self.api_base_url = normalize_base_url(api_base_url)?;
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            health_interval: api::HEALTH_INTERVAL,
        }
    }
}

fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)?;

    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("unsupported URL scheme '{}' in {trimmed}", parsed.scheme());
    }

    Ok(trimmed.to_string())
}

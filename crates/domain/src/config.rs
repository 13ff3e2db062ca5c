//! Client configuration structures

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{DEFAULT_PASSWORD, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::errors::{CaptainError, Result};
use crate::impl_domain_status_conversions;

/// What a destroyed client does with outcomes that become ready afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DestroyPolicy {
    /// Never settle the pending call. Dropping the future releases it.
    #[default]
    Abandon,
    /// Settle the pending call with `CaptainError::Cancelled`
    Cancel,
}

impl_domain_status_conversions!(DestroyPolicy {
    Abandon => "abandon",
    Cancel => "cancel",
});

impl TryFrom<String> for DestroyPolicy {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Configuration for one logical client instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint is appended to (e.g. "https://captain.example.com/api/v2")
    pub base_url: String,
    /// Password used for re-authentication
    #[serde(default = "default_password")]
    pub password: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Value of the `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// What pending calls do once the client is destroyed
    #[serde(default)]
    pub on_destroy: DestroyPolicy,
    /// Artificial delay before each call, for exercising loading states
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

impl ClientConfig {
    /// Configuration for `base_url` with every other setting at its default.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            password: default_password(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            on_destroy: DestroyPolicy::default(),
            simulated_latency_ms: 0,
        }
    }

    /// Per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Artificial delay before each call, `None` when disabled.
    pub fn simulated_latency(&self) -> Option<Duration> {
        (self.simulated_latency_ms > 0).then(|| Duration::from_millis(self.simulated_latency_ms))
    }

    /// Check the configuration before building a client.
    ///
    /// # Errors
    /// Returns `CaptainError::Config` if the base URL is not an absolute
    /// http(s) URL or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            CaptainError::Config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CaptainError::Config(format!(
                "Unsupported base URL scheme '{}': expected http or https",
                url.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(CaptainError::Config("Timeout must be greater than zero".to_string()));
        }

        Ok(())
    }
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

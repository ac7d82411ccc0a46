//! Client configuration: gateway environment, credentials and timeout.
//!
//! Configuration is resolved once and handed to `PtspClient::new`; nothing
//! here is read again per request.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ApiError, Result};

pub const PRODUCTION_URL: &str = "https://ptsp.hyperpay.com";
pub const SANDBOX_URL: &str = "https://ptsp-stg.hyperpay.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_ENVIRONMENT: &str = "PAYMENT_LINK_ENVIRONMENT";
pub const ENV_USERNAME: &str = "PAYMENT_LINK_BASIC_AUTH_USERNAME";
pub const ENV_PASSWORD: &str = "PAYMENT_LINK_BASIC_AUTH_PASSWORD";
pub const ENV_TIMEOUT: &str = "PAYMENT_LINK_TIMEOUT";

/// Gateway environment. Selects one of two fixed base URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_URL,
            Environment::Sandbox => SANDBOX_URL,
        }
    }
}

/// Case-insensitive. `sandbox`, `staging` and `stg` select the sandbox;
/// anything else, including unknown names, selects production.
impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "staging" | "stg" => Environment::Sandbox,
            _ => Environment::Production,
        })
    }
}

/// Resolved, read-only client configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(environment: Environment, username: &str, password: &str) -> Self {
        Self {
            base_url: environment.base_url().to_string(),
            username: username.to_string(),
            password: password.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    /// Point the client at an arbitrary host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// A zero timeout disables the limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Read configuration from the process environment.
    ///
    /// Credentials are required; environment and timeout fall back to
    /// production and 15 seconds. A timeout of `0` means no timeout.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment: Environment = lookup(ENV_ENVIRONMENT)
            .map(|value| value.parse::<Environment>().unwrap_or_default())
            .unwrap_or_default();

        let username = lookup(ENV_USERNAME).filter(|v| !v.is_empty());
        let password = lookup(ENV_PASSWORD).filter(|v| !v.is_empty());
        let (username, password) = match (username, password) {
            (Some(u), Some(p)) => (u, p),
            _ => {
                return Err(ApiError::Config(format!(
                    "missing required config: {ENV_USERNAME}, {ENV_PASSWORD}"
                )))
            }
        };

        let timeout_secs = match lookup(ENV_TIMEOUT).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ApiError::Config(format!("{ENV_TIMEOUT} must be a whole number of seconds, got {raw:?}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(environment, &username, &password)
            .with_timeout(Duration::from_secs(timeout_secs)))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

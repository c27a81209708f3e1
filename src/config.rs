// Runtime configuration: VK token, API base and timeout, read from the
// environment (after `.env` is loaded by `main`).

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://api.vk.com/method";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Runtime settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// VK access token sent as `access_token` with every call.
    pub token: String,
    /// Base URL the method names are appended to.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Ask VK to keep statistics of newly shortened links private.
    pub private: bool,
}

impl Config {
    /// Build the config from the process environment. `.env` loading is the
    /// caller's job (see `main`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env` but with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("VK_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let api_base = lookup("VK_API_BASE")
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout = match lookup("VKCC_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Config {
            token,
            api_base,
            timeout,
            private: false,
        })
    }
}

/// Parse a positive whole number of seconds.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

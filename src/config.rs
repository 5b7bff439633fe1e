//! Client configuration: where the Grist server lives and how to authenticate.
//!
//! Configuration is established once, before the first request, and is never
//! mutated afterwards. Values come from the environment (`GRIST_URL`,
//! `GRIST_TOKEN`, optionally `GRIST_TIMEOUT_SECS`) or from a dotenv-style file,
//! by default `~/.gristle`.

use crate::error::{ConfigError, ConfigResult};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment key holding the server root URL.
pub const ENV_URL: &str = "GRIST_URL";
/// Environment key holding the API bearer token.
pub const ENV_TOKEN: &str = "GRIST_TOKEN";
/// Environment key holding an optional request timeout in seconds.
pub const ENV_TIMEOUT: &str = "GRIST_TIMEOUT_SECS";
/// File name of the default configuration file in the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".gristle";

/// Connection settings for a Grist server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server root URL, without the `/api` suffix and without a trailing slash.
    /// Example: "https://grist.example.com"
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: String,
    /// Overall timeout applied by the HTTP client to each request.
    pub timeout: Option<Duration>,
    /// User agent reported to the server.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration from a base URL and a token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: None,
            user_agent: format!("gristctl/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration from a dotenv-style file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let values = parse_env_file(&contents);
        Self::from_lookup(|key| values.get(key).cloned())
    }

    /// Read configuration from the environment, falling back to `~/.gristle`
    /// when either the URL or the token is missing.
    pub fn load() -> ConfigResult<Self> {
        let has_url = std::env::var(ENV_URL).is_ok_and(|v| !v.is_empty());
        let has_token = std::env::var(ENV_TOKEN).is_ok_and(|v| !v.is_empty());
        if has_url && has_token {
            return Self::from_env();
        }

        let path = default_config_path()?;
        debug!("Environment incomplete, reading configuration from {}", path.display());
        Self::from_file(path)
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_URL)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let token = lookup(ENV_TOKEN)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let mut config = Self::new(base_url, token);
        if let Some(raw) = lookup(ENV_TIMEOUT).filter(|v| !v.is_empty()) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used to issue requests.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if self.token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
            });
        }
        Ok(())
    }
}

/// Location of the default configuration file (`~/.gristle`).
pub fn default_config_path() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DEFAULT_CONFIG_FILE))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped, an
/// `export ` prefix is accepted and matching single or double quotes around
/// the value are removed.
fn parse_env_file(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            Some((key.trim().to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

//! Bridge configuration
//!
//! Settings are resolved once per process from an environment-style map.
//! Every field has a primary key and a list of aliases (see [`keys`]).
//!
//! ```ignore
//! let config = BridgeConfig::load(None)?;
//! println!("talking to {}", config.base_url);
//! ```

pub mod keys;
pub mod parse;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::core::{BridgeError, BridgeResult, ConfigError};

pub const DEFAULT_SPACE_ID: &str = "default";
pub const DEFAULT_AGENT_ID: &str = "elastic-ai-agent";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Resolved connection settings for Kibana's Agent Builder API
#[derive(Clone, PartialEq)]
pub struct BridgeConfig {
    /// Kibana base URL without a trailing slash
    pub base_url: String,

    /// Kibana API key (sent as `Authorization: ApiKey ...`)
    pub api_key: String,

    /// Kibana space the requests are scoped to
    pub space_id: String,

    /// Whether TLS certificates are verified
    pub verify_ssl: bool,

    /// Per-request timeout for converse calls
    pub timeout: Duration,

    /// Agent used when none is chosen explicitly
    pub default_agent_id: String,
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("space_id", &self.space_id)
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout", &self.timeout)
            .field("default_agent_id", &self.default_agent_id)
            .finish()
    }
}

impl BridgeConfig {
    /// Create a config with defaults for everything but URL and key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            space_id: DEFAULT_SPACE_ID.to_string(),
            verify_ssl: true,
            timeout: DEFAULT_TIMEOUT,
            default_agent_id: DEFAULT_AGENT_ID.to_string(),
        }
    }

    /// Resolve settings from an environment-style map
    pub fn resolve(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let base_url = required(&keys::BASE_URL, env)?;
        let api_key = required(&keys::API_KEY, env)?;

        let mut config = Self::new(base_url, api_key);

        if let Some(found) = keys::SPACE_ID.lookup(env) {
            config.space_id = found.value.to_string();
        }
        if let Some(found) = keys::VERIFY_SSL.lookup(env) {
            config.verify_ssl = parse::parse_bool(found.key, found.value)?;
        }
        if let Some(found) = keys::TIMEOUT_SECONDS.lookup(env) {
            config.timeout = parse::parse_seconds(found.key, found.value)?;
        }
        if let Some(found) = keys::DEFAULT_AGENT_ID.lookup(env) {
            config.default_agent_id = found.value.to_string();
        }

        Ok(config)
    }

    /// Resolve settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::resolve(&env)
    }

    /// Load a `.env` file into the process environment, then resolve
    ///
    /// With an explicit path the file must exist. Without one, the nearest
    /// `.env` is used if there is one. Variables already set in the process
    /// environment are never overridden.
    pub fn load(env_file: Option<&Path>) -> BridgeResult<Self> {
        match env_file {
            Some(path) => {
                dotenv::from_path(path).map_err(|e| {
                    BridgeError::invalid_argument(format!(
                        "cannot load env file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                tracing::debug!("Loaded env file {}", path.display());
            }
            None => match dotenv::dotenv() {
                Ok(path) => tracing::debug!("Loaded env file {}", path.display()),
                Err(e) if e.not_found() => {}
                Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
            },
        }

        let config = Self::from_env()?;
        tracing::info!(
            base_url = %config.base_url,
            space = %config.space_id,
            verify_ssl = config.verify_ssl,
            timeout_s = config.timeout.as_secs_f64(),
            "Resolved configuration"
        );
        Ok(config)
    }

    /// Set the space
    pub fn with_space(mut self, space_id: impl Into<String>) -> Self {
        self.space_id = space_id.into();
        self
    }

    /// Set the converse timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path prefix that scopes a request to the configured space
    ///
    /// Kibana serves the default space without a prefix.
    pub fn space_prefix(&self) -> String {
        if self.space_id.is_empty() || self.space_id == DEFAULT_SPACE_ID {
            String::new()
        } else {
            format!("/s/{}", self.space_id)
        }
    }

    /// Full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.space_prefix(), path)
    }
}

fn required(field: &keys::FieldKeys, env: &HashMap<String, String>) -> Result<String, ConfigError> {
    field
        .lookup(env)
        .map(|found| found.value.to_string())
        .ok_or_else(|| ConfigError::Missing {
            field: field.field,
            keys: field.describe(),
        })
}

//! Bridge error types

use thiserror::Error;

/// Problems found while resolving configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required field absent under every accepted key
    #[error("Missing required setting `{field}` (set one of: {keys})")]
    Missing { field: &'static str, keys: String },

    /// Boolean field with an unrecognised token
    #[error("Invalid boolean for {key}: {value:?} (expected true/false, 1/0, yes/no, on/off)")]
    InvalidBool { key: String, value: String },

    /// Numeric field that is not a positive number
    #[error("Invalid number for {key}: {value:?} (expected a positive number of seconds)")]
    InvalidNumber { key: String, value: String },
}

impl ConfigError {
    /// Logical name of the field this error is about
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Missing { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Errors surfaced by the Agent Builder bridge
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Could not reach Kibana (connect, DNS, TLS, timeout)
    #[error("Network error: {reason}")]
    Network { reason: String, timed_out: bool },

    /// Kibana answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Success status but the body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Bad user-supplied argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A turn was sent before any agent was chosen
    #[error("No agent selected")]
    NoAgentSelected,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        BridgeError::InvalidArgument(msg.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, BridgeError::Network { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BridgeError::Network { timed_out: true, .. })
    }

    pub fn is_api(&self) -> bool {
        matches!(self, BridgeError::Api { .. })
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, BridgeError::Configuration(_))
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return BridgeError::Decode(err.to_string());
        }
        BridgeError::Network {
            timed_out: err.is_timeout(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

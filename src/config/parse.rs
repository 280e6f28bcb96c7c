//! Token parsing for typed settings

use std::time::Duration;

use crate::core::ConfigError;

/// Parse a boolean token (`true/false`, `1/0`, `yes/no`, `y/n`, `on/off`)
pub fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "0" | "no" | "n" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Parse a positive, finite number of seconds
pub fn parse_seconds(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidNumber {
        key: key.to_string(),
        value: raw.to_string(),
    };

    let secs: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

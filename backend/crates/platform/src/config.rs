//! Environment Configuration
//!
//! Typed lookups of environment variables with logged defaults.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Read `key`, falling back to `None` when unset or empty.
pub fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Read and parse `key`, using `default` when unset.
///
/// A value that is set but fails to parse is an error, never silently replaced.
pub fn env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env_opt(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            warn!(key, value = %raw, error = %e, "Invalid environment value");
            ConfigError::Invalid {
                key: key.to_string(),
                message: e.to_string(),
            }
        }),
        None => {
            info!(key, default = %default, "Environment variable not set, using default");
            Ok(default)
        }
    }
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_default_when_unset() {
        let port: u16 = env_or("PLATFORM_TEST_SURELY_UNSET_PORT", 5000).unwrap();
        assert_eq!(port, 5000);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" http://a:1, ,http://b:2 ,"),
            vec!["http://a:1".to_string(), "http://b:2".to_string()]
        );
        assert!(split_list("").is_empty());
    }
}

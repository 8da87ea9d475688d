use std::time::Duration;

use thiserror::Error;

use pager_utils::pagination::DEFAULT_TIMEOUT_SECS;

/// Prefix used when `COMMAND_PREFIX` is unset.
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Process configuration read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub token: String,
    pub pagination_timeout: Duration,
    pub command_prefix: String,
}

impl Config {
    /// Read configuration from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let pagination_timeout = match lookup("PAGINATION_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let command_prefix = match lookup("COMMAND_PREFIX") {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    key: "COMMAND_PREFIX",
                    value: raw,
                    reason: "prefix must not be blank",
                });
            }
            Some(raw) => raw.trim().to_owned(),
            None => DEFAULT_COMMAND_PREFIX.to_owned(),
        };

        Ok(Self {
            token,
            pagination_timeout,
            command_prefix,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason| ConfigError::Invalid {
        key: "PAGINATION_TIMEOUT_SECS",
        value: raw.to_owned(),
        reason,
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("timeout must be positive")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err(invalid("expected a whole number of seconds")),
    }
}

use std::{env::var, str::FromStr, time::Duration};

use crate::error::{Result, SessionError};

pub const COMMAND_BUFFER_VAR: &str = "DUNO_COMMAND_BUFFER";
pub const IDLE_TIMEOUT_VAR: &str = "DUNO_IDLE_TIMEOUT_SECS";

const DEFAULT_COMMAND_BUFFER: usize = 32;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

/// Settings shared by every match actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Commands that may queue up for one match before senders wait.
    pub command_buffer: usize,
    /// A match with no command for this long is closed.
    pub idle_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            command_buffer: DEFAULT_COMMAND_BUFFER,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }
}

impl SessionConfig {
    /// Reads the settings from the environment, keeping the default for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let command_buffer = parse_or(&lookup, COMMAND_BUFFER_VAR, defaults.command_buffer)?;
        if command_buffer == 0 {
            return Err(SessionError::Config {
                key: COMMAND_BUFFER_VAR,
                reason: "must be at least 1".to_string(),
            });
        }

        let idle_timeout = parse_or(&lookup, IDLE_TIMEOUT_VAR, defaults.idle_timeout.as_secs())
            .map(Duration::from_secs)?;

        Ok(Self {
            command_buffer,
            idle_timeout,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| SessionError::Config {
            key,
            reason: format!("{raw:?}: {err}"),
        }),
    }
}

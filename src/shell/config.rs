// Process configuration.
//
// Notes
// - main calls dotenvy::dotenv() before Settings::from_env, so a local .env file is honoured.
// - Malformed values abort startup with a ConfigError instead of falling back to defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::modules::exceptions::core::views::DEFAULT_MISSING_CLOCKOUT_THRESHOLD_HOURS;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_NOTIFICATION_BUFFER: usize = 1024;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub database_path: Option<PathBuf>,
    pub notification_buffer: usize,
    pub missing_clockout_threshold_hours: f64,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = match read("BIND_ADDR") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: raw.clone(),
                reason: "expected host:port",
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let notification_buffer = match read("NOTIFICATION_BUFFER") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "NOTIFICATION_BUFFER",
                        value: raw,
                        reason: "expected a positive integer",
                    });
                }
            },
            None => DEFAULT_NOTIFICATION_BUFFER,
        };

        let missing_clockout_threshold_hours = match read("MISSING_CLOCKOUT_THRESHOLD_HOURS") {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(h) if h.is_finite() && h > 0.0 => h,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "MISSING_CLOCKOUT_THRESHOLD_HOURS",
                        value: raw,
                        reason: "expected a positive number of hours",
                    });
                }
            },
            None => DEFAULT_MISSING_CLOCKOUT_THRESHOLD_HOURS,
        };

        Ok(Self {
            bind_addr,
            database_path: read("DATABASE_PATH").map(PathBuf::from),
            notification_buffer,
            missing_clockout_threshold_hours,
        })
    }
}

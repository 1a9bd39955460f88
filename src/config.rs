use std::env;
use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use thiserror::Error;

/// Longest accepted token lifetime: one year.
pub const JWT_EXPIRATION_HOURS_RANGE: RangeInclusive<i64> = 1..=8760;
/// Longest accepted cancellation window: ten years.
pub const CANCELLATION_WINDOW_DAYS_RANGE: RangeInclusive<i64> = 0..=3650;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Fetch the initial dataset over HTTP.
    pub seed_url: Option<String>,
    /// Read the initial dataset from a JSON file.
    pub seed_file: Option<PathBuf>,
    pub cancellation_window_days: i64,
    pub rate_limit_enabled: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("seed_url", &self.seed_url)
            .field("seed_file", &self.seed_file)
            .field("cancellation_window_days", &self.cancellation_window_days)
            .field("rate_limit_enabled", &self.rate_limit_enabled)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            jwt_secret: non_empty_var(&lookup, "JWT_SECRET")
                .ok_or(ConfigError::Missing("JWT_SECRET"))?,
            jwt_expiration_hours: parse_in_range(
                &lookup,
                "JWT_EXPIRATION_HOURS",
                24,
                JWT_EXPIRATION_HOURS_RANGE,
                "number of hours between 1 and 8760",
            )?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_var(&lookup, "SERVER_PORT", 3000, "port number")?,
            seed_url: non_empty_var(&lookup, "SEED_URL"),
            seed_file: non_empty_var(&lookup, "SEED_FILE").map(PathBuf::from),
            cancellation_window_days: parse_in_range(
                &lookup,
                "CANCELLATION_WINDOW_DAYS",
                7,
                CANCELLATION_WINDOW_DAYS_RANGE,
                "number of days between 0 and 3650",
            )?,
            rate_limit_enabled: parse_var(&lookup, "RATE_LIMIT_ENABLED", true, "boolean")?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
        None => Ok(default),
    }
}

fn parse_in_range(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: i64,
    range: RangeInclusive<i64>,
    expected: &'static str,
) -> Result<i64, ConfigError> {
    let value = parse_var(lookup, name, default, expected)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            name,
            expected,
            value: value.to_string(),
        })
    }
}

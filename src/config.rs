//! Runtime configuration, read from the environment at startup.

use crate::error::ConfigError;
use std::time::Duration;

pub const ENDPOINT_VAR: &str = "LOAN_UPLOADER_ENDPOINT";
pub const TICK_MS_VAR: &str = "LOAN_UPLOADER_TICK_MS";
pub const TIMEOUT_SECS_VAR: &str = "LOAN_UPLOADER_TIMEOUT_SECS";

const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/convert-loan";
const DEFAULT_TICK_MS: u64 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    /// Where documents are POSTed for conversion.
    pub endpoint: String,
    /// Interval of the cosmetic progress timer.
    pub tick_interval: Duration,
    /// Upper bound on a single conversion request.
    pub request_timeout: Duration,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl UploaderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            let endpoint = endpoint.trim().to_string();
            let valid = reqwest::Url::parse(&endpoint)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                return Err(ConfigError::InvalidEndpoint(endpoint));
            }
            config.endpoint = endpoint;
        }

        if let Some(ms) = positive_number(&lookup, TICK_MS_VAR)? {
            config.tick_interval = Duration::from_millis(ms);
        }
        if let Some(secs) = positive_number(&lookup, TIMEOUT_SECS_VAR)? {
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn positive_number<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw.clone() })?;
    if value == 0 {
        return Err(ConfigError::ZeroValue { var });
    }
    Ok(Some(value))
}

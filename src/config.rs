use reqwest::Url;
use std::env;
use std::fmt;
use std::time::Duration;

use crate::{Error, Result};

pub const API_KEY_VAR: &str = "OMDB_API_KEY";
pub const TIMEOUT_VAR: &str = "OMDB_TIMEOUT_MS";
pub const BASE_URL_VAR: &str = "OMDB_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Everything needed to talk to OMDb, resolved from the environment.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: Url,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source, so parsing can be checked
    /// without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = match lookup(API_KEY_VAR) {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(Error::Config(format!(
                    "OMDb api key not set, define ${API_KEY_VAR}"
                )))
            }
        };

        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("invalid ${BASE_URL_VAR} '{base_url}': {e}")))?;

        Ok(Self {
            api_key,
            base_url,
            timeout: timeout_from_lookup(lookup)?,
        })
    }
}

// Keeps the api key out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// The per-request timeout on its own, for callers that never need a key.
pub fn timeout_from_env() -> Result<Duration> {
    timeout_from_lookup(|name| env::var(name).ok())
}

fn timeout_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Duration> {
    let Some(raw) = lookup(TIMEOUT_VAR) else {
        return Ok(Duration::from_millis(DEFAULT_TIMEOUT_MS));
    };

    match raw.trim().parse::<u64>() {
        Ok(millis) if millis > 0 => Ok(Duration::from_millis(millis)),
        _ => Err(Error::Config(format!(
            "${TIMEOUT_VAR} must be a positive number of milliseconds, had '{raw}'"
        ))),
    }
}

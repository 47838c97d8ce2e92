//! Runtime configuration read from environment variables.
//!
//! Every setting is optional. Values are read once at startup, before the
//! terminal switches to the alternate screen, so configuration errors are
//! printed normally.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::CareError;

const API_BASE_URL_ENV: &str = "PREDICTIV_API_BASE_URL";
const HTTP_TIMEOUT_ENV: &str = "PREDICTIV_HTTP_TIMEOUT_SECS";
const STATE_PATH_ENV: &str = "PREDICTIV_STATE_PATH";
const OFFLINE_ENV: &str = "PREDICTIV_OFFLINE";

const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STATE_PATH: &str = "predictivcare.db";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the patient REST API (no trailing slash)
    pub api_base_url: Url,

    /// Per-request timeout for API calls
    pub http_timeout: Duration,

    /// SQLite file holding the session token and simulated password
    pub state_path: PathBuf,

    /// Use the in-memory API seeded with sample patients instead of HTTP
    pub offline: bool,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `CareError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, CareError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns `CareError::Config` if a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CareError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(API_BASE_URL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(raw_url.trim_end_matches('/'))
            .map_err(|e| CareError::Config(format!("{API_BASE_URL_ENV}={raw_url}: {e}")))?;
        if api_base_url.cannot_be_a_base() {
            return Err(CareError::Config(format!(
                "{API_BASE_URL_ENV}={raw_url}: not a base URL"
            )));
        }

        let http_timeout = match lookup(HTTP_TIMEOUT_ENV) {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|_| {
                    CareError::Config(format!("{HTTP_TIMEOUT_ENV}={v}: expected whole seconds"))
                })?;
                if secs == 0 {
                    return Err(CareError::Config(format!(
                        "{HTTP_TIMEOUT_ENV} must be greater than zero"
                    )));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let state_path = lookup(STATE_PATH_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH));

        let offline = match lookup(OFFLINE_ENV) {
            Some(v) => parse_flag(&v)
                .ok_or_else(|| CareError::Config(format!("{OFFLINE_ENV}={v}: expected 1/0/true/false")))?,
            None => false,
        };

        Ok(Self {
            api_base_url,
            http_timeout,
            state_path,
            offline,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).expect("Defaults should parse");
        assert_eq!(config.api_base_url.as_str(), "http://localhost:3001/");
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.state_path, PathBuf::from("predictivcare.db"));
        assert!(!config.offline);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (API_BASE_URL_ENV, "https://api.predictivcare.example/v1/"),
            (HTTP_TIMEOUT_ENV, "3"),
            (STATE_PATH_ENV, "/tmp/state.db"),
            (OFFLINE_ENV, "true"),
        ]))
        .expect("Overrides should parse");

        assert_eq!(config.api_base_url.host_str(), Some("api.predictivcare.example"));
        assert_eq!(config.api_base_url.path(), "/v1");
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.state_path, PathBuf::from("/tmp/state.db"));
        assert!(config.offline);
    }

    #[test]
    fn test_ipv6_loopback_base_url() {
        let config = Config::from_lookup(lookup_from(&[(API_BASE_URL_ENV, "http://[::1]:3001")]))
            .expect("IPv6 loopback should parse");
        assert_eq!(config.api_base_url.port(), Some(3001));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_lookup(lookup_from(&[(API_BASE_URL_ENV, "not a url")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(HTTP_TIMEOUT_ENV, "ten")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(HTTP_TIMEOUT_ENV, "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(OFFLINE_ENV, "maybe")])).is_err());
    }
}

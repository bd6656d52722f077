use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::api::{cricapi, cricbuzz};

/// Which upstream cricket data provider to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// RapidAPI Cricbuzz
    Cricbuzz,
    /// CricketData.org
    CricApi,
}

impl ProviderKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cricbuzz" | "rapidapi" => Ok(ProviderKind::Cricbuzz),
            "cricapi" | "cricketdata" => Ok(ProviderKind::CricApi),
            other => bail!("CRICKET_PROVIDER must be 'cricbuzz' or 'cricapi', got '{}'", other),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderKind,

    /// RapidAPI key for Cricbuzz
    pub rapidapi_key: Option<String>,

    /// RapidAPI host header, also used to build the base URL
    pub rapidapi_host: String,

    /// CricketData.org key
    pub cricapi_key: Option<String>,

    pub cricapi_base_url: String,

    /// Overrides the selected provider's base URL
    pub base_url_override: Option<String>,

    /// Per-request timeout in seconds
    pub request_timeout: u64,

    /// TTL in seconds of the current-matches cache slot
    pub match_cache_ttl: u64,

    /// Window in seconds during which identical requests are coalesced
    pub dedupe_window: u64,

    /// Interval in seconds for polling live match lists
    pub live_poll_interval: u64,

    /// Interval in seconds for polling a single match
    pub detail_poll_interval: u64,

    /// Interval in seconds for polling featured series
    pub series_poll_interval: u64,

    /// HTTP listen address
    pub bind_addr: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let secs = |key: &str, default: &str| -> Result<u64> {
            var(key, default)
                .trim()
                .parse()
                .with_context(|| format!("{} must be a valid number", key))
        };

        Ok(Config {
            provider: ProviderKind::parse(&var("CRICKET_PROVIDER", "cricbuzz"))?,
            rapidapi_key: lookup("RAPIDAPI_KEY").filter(|k| !k.trim().is_empty()),
            rapidapi_host: var("RAPIDAPI_HOST", cricbuzz::DEFAULT_HOST),
            cricapi_key: lookup("CRICAPI_KEY").filter(|k| !k.trim().is_empty()),
            cricapi_base_url: var("CRICAPI_BASE_URL", cricapi::DEFAULT_BASE_URL),
            base_url_override: lookup("CRICKET_API_BASE_URL").filter(|u| !u.trim().is_empty()),
            request_timeout: secs("REQUEST_TIMEOUT_SECS", "10")?,
            match_cache_ttl: secs("MATCH_CACHE_TTL_SECS", "30")?,
            dedupe_window: secs("DEDUPE_WINDOW_SECS", "5")?,
            live_poll_interval: secs("LIVE_POLL_INTERVAL", "10")?,
            detail_poll_interval: secs("DETAIL_POLL_INTERVAL", "15")?,
            series_poll_interval: secs("SERIES_POLL_INTERVAL", "300")?,
            bind_addr: var("BIND_ADDR", "0.0.0.0:3000"),
        })
    }

    /// Base URL for the selected provider
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.base_url_override {
            return url.clone();
        }
        match self.provider {
            ProviderKind::Cricbuzz => format!("https://{}", self.rapidapi_host),
            ProviderKind::CricApi => self.cricapi_base_url.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.provider, ProviderKind::Cricbuzz);
        assert_eq!(config.rapidapi_key, None);
        assert_eq!(config.base_url(), "https://cricbuzz-cricket.p.rapidapi.com");
        assert_eq!(config.match_cache_ttl, 30);
        assert_eq!(config.dedupe_window, 5);
        assert_eq!(config.live_poll_interval, 10);
        assert_eq!(config.detail_poll_interval, 15);
        assert_eq!(config.series_poll_interval, 300);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_cricapi_selection_and_override() {
        let config = config_from(&[
            ("CRICKET_PROVIDER", "CricAPI"),
            ("CRICAPI_KEY", "abc"),
        ])
        .unwrap();
        assert_eq!(config.provider, ProviderKind::CricApi);
        assert_eq!(config.base_url(), "https://api.cricapi.com/v1");

        let config = config_from(&[
            ("CRICKET_PROVIDER", "cricapi"),
            ("CRICKET_API_BASE_URL", "http://localhost:9000"),
        ])
        .unwrap();
        assert_eq!(config.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = config_from(&[("RAPIDAPI_KEY", "   ")]).unwrap();
        assert_eq!(config.rapidapi_key, None);
    }

    #[test]
    fn test_invalid_values_fail() {
        let err = config_from(&[("LIVE_POLL_INTERVAL", "fast")]).unwrap_err();
        assert!(err.to_string().contains("LIVE_POLL_INTERVAL"));

        assert!(config_from(&[("CRICKET_PROVIDER", "espn")]).is_err());
    }
}

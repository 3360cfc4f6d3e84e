use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CoinError, CoinResult};

pub const DEFAULT_BASE_URL: &str = "https://api.coinpaprika.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    pub max_attempts: u32,
    pub idle_ttl: Duration,
    pub max_coins: usize,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            max_attempts: 4,
            idle_ttl: Duration::from_secs(60),
            max_coins: 32,
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Config {
    pub fn from_env() -> CoinResult<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> CoinResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let base_url = lookup("COINPAPRIKA_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        if base_url.is_empty() {
            return Err(CoinError::Config {
                key: "COINPAPRIKA_BASE_URL".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let refresh_secs: u64 = parse_or(&lookup, "TICKER_REFRESH_SECS", 5)?;
        if refresh_secs == 0 {
            return Err(CoinError::Config {
                key: "TICKER_REFRESH_SECS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        let timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10)?;
        let max_attempts: u32 = parse_or(&lookup, "FETCH_MAX_ATTEMPTS", defaults.max_attempts)?;
        if max_attempts == 0 {
            return Err(CoinError::Config {
                key: "FETCH_MAX_ATTEMPTS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let idle_secs: u64 = parse_or(&lookup, "COIN_IDLE_SECS", 60)?;
        if idle_secs == 0 {
            return Err(CoinError::Config {
                key: "COIN_IDLE_SECS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        let max_coins: usize = parse_or(&lookup, "MAX_MOUNTED_COINS", defaults.max_coins)?;
        if max_coins == 0 {
            return Err(CoinError::Config {
                key: "MAX_MOUNTED_COINS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            base_url,
            refresh_interval: Duration::from_secs(refresh_secs),
            request_timeout: Duration::from_secs(timeout_secs),
            max_attempts,
            idle_ttl: Duration::from_secs(idle_secs),
            max_coins,
            host: lookup("SERVER_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "SERVER_PORT", defaults.port)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> CoinResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| CoinError::Config {
            key: key.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

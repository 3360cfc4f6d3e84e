pub mod coinpaprika;
pub mod cron;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

use crate::error::{CoinError, CoinResult};

const MAX_BACKOFF_SECS: u64 = 30;

pub fn normalize_coin_id(coin_id: &str) -> CoinResult<String> {
    let trimmed = coin_id.trim();
    if trimmed.is_empty() {
        return Err(CoinError::EmptyCoinId);
    }
    // Dot segments survive percent-encoding and would be resolved by the upstream.
    if trimmed == "." || trimmed == ".." {
        return Err(CoinError::InvalidCoinId(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

pub fn format_price(price: f64) -> String {
    format!("{:.3}", price)
}

pub fn format_symbol(symbol: &str) -> String {
    format!("${}", symbol)
}

/// Delay before retrying after `failed_attempts` failures: 1s, 2s, 4s ... capped.
pub fn backoff_delay(failed_attempts: u32) -> Duration {
    let exp = failed_attempts.saturating_sub(1).min(16);
    let secs = 1u64.checked_shl(exp).unwrap_or(u64::MAX);
    Duration::from_secs(secs.min(MAX_BACKOFF_SECS))
}

/// Runs `op` up to `max_attempts` times, sleeping `backoff_delay` between
/// failed attempts. The last error is returned once attempts run out.
pub async fn retry_with_backoff<T, F, Fut>(max_attempts: u32, label: &str, mut op: F) -> CoinResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = CoinResult<T>>,
{
    let mut attempts = 0;

    loop {
        attempts += 1;
        debug!("Fetching {} (Attempt {})", label, attempts);
        match op().await {
            Ok(data) => return Ok(data),
            Err(e) => {
                if attempts >= max_attempts {
                    return Err(e);
                }
                let delay = backoff_delay(attempts);
                warn!("Request to {} failed: {}. Retrying in {:?}", label, e, delay);
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Non-2xx statuses and undecodable bodies are both failed attempts.
pub fn decode_response<T: DeserializeOwned>(status: u16, url: &str, body: &str) -> CoinResult<T> {
    if !(200..300).contains(&status) {
        return Err(CoinError::Status {
            status,
            url: url.to_string(),
        });
    }
    Ok(serde_json::from_str::<T>(body)?)
}

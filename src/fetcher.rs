use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::CoinResult;
use crate::models::{CoinDetail, CoinInfo, CoinTicker};

/// Remote origin of coin records. Both calls must be idempotent.
#[async_trait]
pub trait CoinSource: Send + Sync {
    async fn fetch_coin_info(&self, coin_id: &str) -> CoinResult<CoinInfo>;
    async fn fetch_coin_ticker(&self, coin_id: &str) -> CoinResult<CoinTicker>;
}

/// Applies `apply` only while `generation` is still the mounted one.
/// The check and the write happen under the channel's lock.
pub(crate) fn commit<F>(state: &watch::Sender<CoinDetail>, generation: u64, apply: F) -> bool
where
    F: FnOnce(&mut CoinDetail),
{
    state.send_if_modified(|detail| {
        if detail.generation != generation {
            return false;
        }
        apply(detail);
        true
    })
}

pub async fn fetch_info<S>(
    source: &S,
    state: &watch::Sender<CoinDetail>,
    coin_id: &str,
    generation: u64,
) -> bool
where
    S: CoinSource + ?Sized,
{
    let applied = match source.fetch_coin_info(coin_id).await {
        Ok(info) => commit(state, generation, |detail| {
            detail.info = Some(Arc::new(info));
            detail.info_error = None;
        }),
        Err(err) => {
            warn!("Error fetching info for {}: {}", coin_id, err);
            commit(state, generation, |detail| {
                detail.info_error = Some(err.to_string());
            })
        }
    };
    if !applied {
        debug!("Dropped stale info result for {}", coin_id);
    }
    applied
}

pub async fn refresh_ticker<S>(
    source: &S,
    state: &watch::Sender<CoinDetail>,
    coin_id: &str,
    generation: u64,
) -> bool
where
    S: CoinSource + ?Sized,
{
    let applied = match source.fetch_coin_ticker(coin_id).await {
        Ok(ticker) => commit(state, generation, |detail| {
            detail.ticker = Some(Arc::new(ticker));
            detail.ticker_updated_at = Some(Utc::now());
            detail.ticker_error = None;
        }),
        Err(err) => {
            warn!("Error fetching ticker for {}: {}", coin_id, err);
            // A failed refresh keeps the previous snapshot.
            commit(state, generation, |detail| {
                detail.ticker_error = Some(err.to_string());
            })
        }
    };
    if !applied {
        debug!("Dropped stale ticker result for {}", coin_id);
    }
    applied
}

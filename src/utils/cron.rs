use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::fetcher::{refresh_ticker, CoinSource};
use crate::models::CoinDetail;
use crate::registry::SharedRegistry;

/// Fetches the ticker at once and then on every `period` tick until the
/// generation is superseded or the task is aborted.
pub async fn start_ticker_refresh<S>(
    source: Arc<S>,
    state: Arc<watch::Sender<CoinDetail>>,
    coin_id: String,
    generation: u64,
    period: Duration,
) where
    S: CoinSource + ?Sized,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let superseded = state.borrow().generation != generation;
        if superseded {
            debug!("Ticker refresh for {} superseded, stopping", coin_id);
            break;
        }
        debug!("Refreshing ticker for {}", coin_id);
        refresh_ticker(source.as_ref(), &state, &coin_id, generation).await;
    }
}

pub async fn start_idle_sweep(registry: Arc<SharedRegistry>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let evicted = registry.lock().await.evict_idle();
        if evicted > 0 {
            debug!("Idle sweep unmounted {} coin(s)", evicted);
        }
    }
}

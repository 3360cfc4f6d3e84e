use futures_util::lock::Mutex;
use log::info;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::controller::CoinDetailController;
use crate::error::CoinResult;
use crate::fetcher::CoinSource;
use crate::models::CoinDetail;
use crate::utils::normalize_coin_id;

pub type SharedRegistry = Mutex<CoinRegistry<dyn CoinSource>>;

struct MountedCoin<S: CoinSource + ?Sized> {
    controller: CoinDetailController<S>,
    last_seen: Instant,
}

/// One controller per coin being viewed. Viewing a coin never disturbs the
/// controller of another one; controllers nobody has asked for within
/// `idle_ttl` are unmounted by `evict_idle`.
pub struct CoinRegistry<S: CoinSource + ?Sized> {
    source: Arc<S>,
    refresh_interval: Duration,
    idle_ttl: Duration,
    max_coins: usize,
    coins: HashMap<String, MountedCoin<S>>,
}

impl<S> CoinRegistry<S>
where
    S: CoinSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>, refresh_interval: Duration, idle_ttl: Duration, max_coins: usize) -> Self {
        Self {
            source,
            refresh_interval,
            idle_ttl,
            max_coins: max_coins.max(1),
            coins: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_mounted(&self, coin_id: &str) -> bool {
        self.coins.contains_key(coin_id)
    }

    /// Current view of `coin_id`, mounting a controller for it on first use.
    /// Must be called from within a tokio runtime.
    pub fn view(&mut self, coin_id: &str) -> CoinResult<CoinDetail> {
        let coin_id = normalize_coin_id(coin_id)?;
        if !self.coins.contains_key(&coin_id) && self.coins.len() >= self.max_coins {
            self.evict_least_recent();
        }

        let now = Instant::now();
        let mounted = match self.coins.entry(coin_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let mut controller =
                    CoinDetailController::new(self.source.clone(), self.refresh_interval);
                controller.set_coin(entry.key())?;
                entry.insert(MountedCoin {
                    controller,
                    last_seen: now,
                })
            }
        };
        mounted.last_seen = now;
        Ok(mounted.controller.current())
    }

    /// Unmounts every coin idle for at least `idle_ttl`; returns how many.
    pub fn evict_idle(&mut self) -> usize {
        let now = Instant::now();
        let idle_ttl = self.idle_ttl;
        let before = self.coins.len();
        self.coins.retain(|coin_id, mounted| {
            let keep = now.duration_since(mounted.last_seen) < idle_ttl;
            if !keep {
                info!("Evicting idle coin {}", coin_id);
                mounted.controller.unmount();
            }
            keep
        });
        before - self.coins.len()
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .coins
            .iter()
            .min_by_key(|(_, mounted)| mounted.last_seen)
            .map(|(coin_id, _)| coin_id.clone());
        if let Some(coin_id) = oldest {
            info!("Mounted coin limit reached, evicting {}", coin_id);
            if let Some(mut mounted) = self.coins.remove(&coin_id) {
                mounted.controller.unmount();
            }
        }
    }
}

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::{CoinInfo, CoinTicker};

/// Everything a consumer sees for the coin currently mounted.
///
/// Snapshots are shared behind `Arc` so that cloning a view never copies a
/// record and a refreshed ticker always lands as one whole value.
#[derive(Debug, Clone, Default)]
pub struct CoinDetail {
    pub coin_id: Option<String>,
    pub info: Option<Arc<CoinInfo>>,
    pub ticker: Option<Arc<CoinTicker>>,
    pub ticker_updated_at: Option<DateTime<Utc>>,
    pub info_error: Option<String>,
    pub ticker_error: Option<String>,
    pub(crate) generation: u64,
}

impl CoinDetail {
    pub(crate) fn pending(coin_id: &str, generation: u64) -> Self {
        Self {
            coin_id: Some(coin_id.to_string()),
            generation,
            ..Default::default()
        }
    }

    pub(crate) fn unmounted(generation: u64) -> Self {
        Self {
            generation,
            ..Default::default()
        }
    }

    pub fn is_info_loading(&self) -> bool {
        self.info.is_none()
    }

    pub fn is_ticker_loading(&self) -> bool {
        self.ticker.is_none()
    }

    pub fn is_loading(&self) -> bool {
        self.is_info_loading() || self.is_ticker_loading()
    }

    /// Most recent absorbed failure, info first.
    pub fn last_error(&self) -> Option<&str> {
        self.info_error
            .as_deref()
            .or(self.ticker_error.as_deref())
    }

    /// Navigation name wins, then a loading placeholder, then the fetched name.
    pub fn title(&self, nav_name: Option<&str>) -> String {
        match nav_name.filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None if self.is_loading() => "Loading...".to_string(),
            None => self
                .info
                .as_ref()
                .map(|info| info.name.clone())
                .unwrap_or_default(),
        }
    }
}

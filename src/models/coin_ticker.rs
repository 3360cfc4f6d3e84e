use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UsdQuote {
    pub price: f64,
    #[serde(default)]
    pub volume_24h: f64,
    #[serde(default)]
    pub volume_24h_change_24h: f64,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub market_cap_change_24h: f64,
    #[serde(default)]
    pub percent_change_15m: f64,
    #[serde(default)]
    pub percent_change_30m: f64,
    #[serde(default)]
    pub percent_change_1h: f64,
    #[serde(default)]
    pub percent_change_6h: f64,
    #[serde(default)]
    pub percent_change_12h: f64,
    #[serde(default)]
    pub percent_change_24h: f64,
    #[serde(default)]
    pub percent_change_7d: f64,
    #[serde(default)]
    pub percent_change_30d: f64,
    #[serde(default)]
    pub percent_change_1y: f64,
    #[serde(default)]
    pub ath_price: Option<f64>,
    #[serde(default)]
    pub ath_date: Option<String>,
    #[serde(default)]
    pub percent_from_price_ath: Option<f64>,
}

impl UsdQuote {
    /// Percent changes ordered from the shortest window to the longest.
    pub fn percent_changes(&self) -> [(&'static str, f64); 9] {
        [
            ("15m", self.percent_change_15m),
            ("30m", self.percent_change_30m),
            ("1h", self.percent_change_1h),
            ("6h", self.percent_change_6h),
            ("12h", self.percent_change_12h),
            ("24h", self.percent_change_24h),
            ("7d", self.percent_change_7d),
            ("30d", self.percent_change_30d),
            ("1y", self.percent_change_1y),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TickerQuotes {
    #[serde(rename = "USD")]
    pub usd: UsdQuote,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CoinTicker {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub rank: u32,
    #[serde(default)]
    pub circulating_supply: f64,
    #[serde(default)]
    pub total_supply: f64,
    #[serde(default)]
    pub max_supply: f64,
    #[serde(default)]
    pub beta_value: f64,
    #[serde(default)]
    pub first_data_at: Option<String>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    pub quotes: TickerQuotes,
}

impl CoinTicker {
    pub fn price(&self) -> f64 {
        self.quotes.usd.price
    }
}

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use serde::de::DeserializeOwned;

use super::{decode_response, retry_with_backoff};
use crate::config::Config;
use crate::error::CoinResult;
use crate::fetcher::CoinSource;
use crate::models::{CoinInfo, CoinTicker};

pub struct CoinPaprika {
    client: Client,
    base_url: String,
    max_attempts: u32,
}

impl CoinPaprika {
    pub fn init(config: &Config) -> CoinResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            max_attempts: config.max_attempts,
        })
    }

    // The id always travels as one encoded path segment.
    pub fn info_url(&self, coin_id: &str) -> String {
        format!("{}/coins/{}", self.base_url, urlencoding::encode(coin_id))
    }

    pub fn ticker_url(&self, coin_id: &str) -> String {
        format!("{}/tickers/{}", self.base_url, urlencoding::encode(coin_id))
    }

    async fn fetch_once<T: DeserializeOwned>(&self, url: &str) -> CoinResult<T> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, url, &body)
    }

    async fn fetch_with_retry<T: DeserializeOwned>(&self, url: &str) -> CoinResult<T> {
        retry_with_backoff(self.max_attempts, url, || self.fetch_once::<T>(url)).await
    }
}

#[async_trait]
impl CoinSource for CoinPaprika {
    async fn fetch_coin_info(&self, coin_id: &str) -> CoinResult<CoinInfo> {
        let url = self.info_url(coin_id);
        self.fetch_with_retry(&url).await
    }

    async fn fetch_coin_ticker(&self, coin_id: &str) -> CoinResult<CoinTicker> {
        let url = self.ticker_url(coin_id);
        self.fetch_with_retry(&url).await
    }
}

use reqwest::Error as ReqwestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoinError {
    #[error("Coin identifier must not be empty")]
    EmptyCoinId,

    #[error("Invalid coin identifier: {0}")]
    InvalidCoinId(String),

    #[error("Request error: {0}")]
    Request(#[from] ReqwestError),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid config value for {key}: {reason}")]
    Config { key: String, reason: String },

    #[error("Unknown coin tab: {0}")]
    UnknownTab(String),
}

pub type CoinResult<T> = Result<T, CoinError>;

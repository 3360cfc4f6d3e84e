pub mod coin_detail;
pub mod coin_info;
pub mod coin_ticker;

pub use coin_detail::CoinDetail;
pub use coin_info::CoinInfo;
pub use coin_ticker::{CoinTicker, TickerQuotes, UsdQuote};

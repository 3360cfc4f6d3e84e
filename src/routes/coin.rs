use actix_web::{
    get,
    web::{self, ServiceConfig},
    HttpResponse, Responder,
};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{CoinError, CoinResult};
use crate::models::{CoinDetail, CoinInfo, CoinTicker};
use crate::registry::SharedRegistry;
use crate::utils::{format_price, format_symbol};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubView {
    Overview,
    Chart,
    Price,
}

impl SubView {
    pub fn from_segment(segment: &str) -> CoinResult<Self> {
        match segment {
            "chart" => Ok(SubView::Chart),
            "price" => Ok(SubView::Price),
            other => Err(CoinError::UnknownTab(other.to_string())),
        }
    }

    pub fn is_chart(self) -> bool {
        self == SubView::Chart
    }

    pub fn is_price(self) -> bool {
        self == SubView::Price
    }
}

#[derive(Serialize, Debug)]
pub struct Tab {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

#[derive(Serialize, Debug)]
pub struct Overview {
    pub rank: u32,
    pub symbol: String,
    pub price: String,
}

#[derive(Serialize, Debug)]
pub struct Supply {
    pub total_supply: f64,
    pub max_supply: f64,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ChartPoint {
    pub window: &'static str,
    pub percent_change: f64,
}

#[derive(Serialize, Debug)]
pub struct PriceView {
    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub ath_price: Option<f64>,
    pub ath_date: Option<String>,
    pub percent_from_price_ath: Option<f64>,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
    pub percent_change_30d: f64,
}

#[derive(Serialize, Debug)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ViewPayload {
    Chart { points: Vec<ChartPoint> },
    Price(PriceView),
}

impl ViewPayload {
    pub fn build(view: SubView, ticker: &CoinTicker) -> Option<Self> {
        let quote = &ticker.quotes.usd;
        match view {
            SubView::Overview => None,
            SubView::Chart => Some(ViewPayload::Chart {
                points: quote
                    .percent_changes()
                    .into_iter()
                    .map(|(window, percent_change)| ChartPoint {
                        window,
                        percent_change,
                    })
                    .collect(),
            }),
            SubView::Price => Some(ViewPayload::Price(PriceView {
                price: quote.price,
                market_cap: quote.market_cap,
                volume_24h: quote.volume_24h,
                ath_price: quote.ath_price,
                ath_date: quote.ath_date.clone(),
                percent_from_price_ath: quote.percent_from_price_ath,
                percent_change_1h: quote.percent_change_1h,
                percent_change_24h: quote.percent_change_24h,
                percent_change_7d: quote.percent_change_7d,
                percent_change_30d: quote.percent_change_30d,
            })),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CoinContent {
    pub overview: Overview,
    pub description: Option<String>,
    pub supply: Supply,
    pub tabs: Vec<Tab>,
    pub view: Option<ViewPayload>,
}

impl CoinContent {
    fn build(coin_id: &str, info: &CoinInfo, ticker: &CoinTicker, view: SubView) -> Self {
        Self {
            overview: Overview {
                rank: info.rank,
                symbol: format_symbol(&info.symbol),
                price: format_price(ticker.price()),
            },
            description: info.description.clone(),
            supply: Supply {
                total_supply: ticker.total_supply,
                max_supply: ticker.max_supply,
            },
            tabs: vec![
                Tab {
                    label: "Chart",
                    href: format!("/coins/{}/chart", coin_id),
                    active: view.is_chart(),
                },
                Tab {
                    label: "Price",
                    href: format!("/coins/{}/price", coin_id),
                    active: view.is_price(),
                },
            ],
            view: ViewPayload::build(view, ticker),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CoinPage {
    pub coin_id: Option<String>,
    pub title: String,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub content: Option<CoinContent>,
}

impl CoinPage {
    pub fn build(detail: &CoinDetail, view: SubView, nav_name: Option<&str>) -> Self {
        let content = match (&detail.coin_id, &detail.info, &detail.ticker) {
            (Some(coin_id), Some(info), Some(ticker)) => {
                Some(CoinContent::build(coin_id, info, ticker, view))
            }
            _ => None,
        };
        Self {
            coin_id: detail.coin_id.clone(),
            title: detail.title(nav_name),
            loading: detail.is_loading(),
            error: detail.last_error().map(str::to_string),
            content,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct NavState {
    pub name: Option<String>,
}

async fn render(
    registry: &SharedRegistry,
    coin_id: &str,
    view: SubView,
    nav_name: Option<&str>,
) -> HttpResponse {
    let detail = registry.lock().await.view(coin_id);
    match detail {
        Ok(detail) => HttpResponse::Ok().json(CoinPage::build(&detail, view, nav_name)),
        Err(err) => {
            warn!("Rejected coin route {:?}: {}", coin_id, err);
            HttpResponse::BadRequest().json(err.to_string())
        }
    }
}

#[get("/coins/{coin_id}")]
pub async fn coin_overview(
    registry: web::Data<SharedRegistry>,
    path: web::Path<String>,
    nav: web::Query<NavState>,
) -> impl Responder {
    let coin_id = path.into_inner();
    render(&registry, &coin_id, SubView::Overview, nav.name.as_deref()).await
}

#[get("/coins/{coin_id}/{tab}")]
pub async fn coin_tab(
    registry: web::Data<SharedRegistry>,
    path: web::Path<(String, String)>,
    nav: web::Query<NavState>,
) -> impl Responder {
    let (coin_id, tab) = path.into_inner();
    match SubView::from_segment(&tab) {
        Ok(view) => render(&registry, &coin_id, view, nav.name.as_deref()).await,
        Err(err) => HttpResponse::NotFound().json(err.to_string()),
    }
}

pub fn init(config: &mut ServiceConfig) {
    config.service(coin_overview).service(coin_tab);
}

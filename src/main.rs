mod config;
mod controller;
mod error;
mod fetcher;
mod models;
mod registry;
mod routes;
mod utils;
use actix_cors::Cors;
use actix_web::{get, web::Data, App, HttpResponse, HttpServer, Responder};
use config::Config;
use fetcher::CoinSource;
use futures_util::lock::Mutex;
use log::{error, info};
use registry::CoinRegistry;
use std::sync::Arc;
use utils::coinpaprika::CoinPaprika;
use utils::cron::start_idle_sweep;

#[get("/")]
async fn home() -> impl Responder {
    HttpResponse::Ok().body("Coin Tracker")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()));
        }
    };
    let client = CoinPaprika::init(&config)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;
    let source: Arc<dyn CoinSource> = Arc::new(client);

    let registry = Arc::new(Mutex::new(CoinRegistry::new(
        source,
        config.refresh_interval,
        config.idle_ttl,
        config.max_coins,
    )));
    tokio::spawn(start_idle_sweep(registry.clone(), config.refresh_interval));
    let registry = Data::from(registry);

    info!(
        "Serving coin pages from {} on {}:{}",
        config.base_url, config.host, config.port
    );
    let server = HttpServer::new(move || {
        App::new()
            .app_data(registry.clone())
            .wrap(Cors::permissive())
            .service(home)
            .configure(routes::coin::init)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    server.await?;

    Ok(())
}

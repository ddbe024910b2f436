mod catalog;
mod config;
mod error;
mod handlers;
mod models;
mod predictor;
mod selector;
mod validation;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::AppState;
use crate::predictor::RemotePredictor;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let predictor = RemotePredictor::new(&config.predict_url, config.timeout_secs)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    tracing::info!(
        bind = %config.bind,
        predict_url = predictor.url(),
        threshold = config.threshold,
        "skin-diagnosis starting v{}",
        env!("CARGO_PKG_VERSION")
    );

    let state = web::Data::new(AppState {
        predictor,
        threshold: config.threshold,
        limits: config.limits(),
    });

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(handlers::configure::<RemotePredictor>)
    })
    .bind(&config.bind)?
    .run()
    .await
}

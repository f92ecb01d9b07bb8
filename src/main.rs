mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{
    http::header,
    middleware::{Compress, Logger},
    web, App, HttpServer,
};

use crate::config::AppConfig;
use crate::services::{AuthService, ProfileService};

fn cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting Student Registration service...");

    let store = database::connect(&config.database_url).await.map_err(|e| {
        log::error!("❌ Failed to connect to user store: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let auth = AuthService::from_config(&config);
    let profile_data = web::Data::new(ProfileService::new(store, auth.clone()));
    let auth_data = web::Data::new(auth);

    log::info!("🌐 Server starting on {}", config.bind_address());
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", config.bind_address());

    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(profile_data.clone())
            .app_data(auth_data.clone())
            .wrap(cors(&origins))
            .wrap(middleware::SecurityHeaders)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .bind(config.bind_address())?
    .run()
    .await
}

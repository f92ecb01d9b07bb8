pub mod auth;
pub mod health;
pub mod profile;
pub mod static_pages;
pub mod swagger;

use actix_web::web;

use crate::middleware::auth::AuthMiddleware;
use crate::utils::AppError;

/// Registers every route. Expects `ProfileService` and `AuthService` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected request body: {}", err);
        AppError::BadRequest("Invalid request body").into()
    }))
    .route("/health", web::get().to(health::health_check))
    .route("/api-docs/openapi.json", web::get().to(swagger::openapi_json))
    .service(
        web::scope("/api")
            .service(
                web::resource("/register")
                    .route(web::post().to(auth::register))
                    .default_service(web::to(static_pages::serve)),
            )
            .service(
                web::resource("/login")
                    .route(web::post().to(auth::login))
                    .default_service(web::to(static_pages::serve)),
            )
            // Auth sits on the route so other methods still reach the client fallback
            .service(
                web::resource("/dashboard")
                    .route(web::get().to(profile::dashboard).wrap(AuthMiddleware))
                    .default_service(web::to(static_pages::serve)),
            )
            .service(
                web::resource("/add-course")
                    .route(web::post().to(profile::add_course).wrap(AuthMiddleware))
                    .default_service(web::to(static_pages::serve)),
            )
            .service(
                web::resource("/remove-course")
                    .route(web::post().to(profile::remove_course).wrap(AuthMiddleware))
                    .default_service(web::to(static_pages::serve)),
            )
            .default_service(web::to(static_pages::serve)),
    )
    // Bundled client, SPA fallback for everything else
    .service(web::resource("/{tail:.*}").to(static_pages::serve));
}

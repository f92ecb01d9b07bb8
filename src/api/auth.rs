use actix_web::{web, HttpResponse};

use crate::services::profile_service::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services::ProfileService;
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Missing fields or user already exists"),
        (status = 500, description = "Registration failed")
    )
)]
pub async fn register(
    service: web::Data<ProfileService>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /api/register - email: {}", email);

    match service.register(&request).await {
        Ok(response) => {
            log::info!("✅ Registration successful: {} ({})", email, response.user.id);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", email, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing fields or invalid credentials"),
        (status = 500, description = "Login failed")
    )
)]
pub async fn login(
    service: web::Data<ProfileService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /api/login - email: {}", email);

    match service.login(&request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", email);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", email, e);
            Err(e)
        }
    }
}

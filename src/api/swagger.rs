use actix_web::HttpResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Registration API",
        version = "1.0.0",
        description = "Register, log in and manage the list of courses on your profile.\n\n**Authentication:** dashboard and course endpoints require a Bearer token returned by register/login. Tokens are valid for 7 days."
    ),
    paths(
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::profile::dashboard,
        crate::api::profile::add_course,
        crate::api::profile::remove_course,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::profile_service::RegisterRequest,
            crate::services::profile_service::LoginRequest,
            crate::services::profile_service::CourseRequest,
            crate::services::profile_service::AuthResponse,
            crate::services::profile_service::CoursesResponse,
            crate::models::PublicUser,
            crate::models::UserProfile,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login. Both return a bearer token."),
        (name = "Profile", description = "Dashboard and course list of the authenticated user."),
        (name = "Health", description = "Service and store status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/register or /api/login"))
                        .build(),
                ),
            );
        }
    }
}

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

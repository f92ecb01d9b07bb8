use actix_web::{web, HttpResponse};

use crate::middleware::auth::AuthenticatedUser;
use crate::models::UserProfile;
use crate::services::profile_service::{CourseRequest, CoursesResponse};
use crate::services::ProfileService;
use crate::utils::AppError;

/// GET /api/dashboard - Profile of the token holder (no password)
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Profile",
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn dashboard(
    user: web::ReqData<AuthenticatedUser>,
    service: web::Data<ProfileService>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /api/dashboard - user {}", user.user_id);

    let profile = service.dashboard(&user.user_id).await.map_err(|e| {
        log::warn!("❌ Dashboard failed for {}: {}", user.user_id, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(profile))
}

/// POST /api/add-course - Appends a course unless already registered
#[utoipa::path(
    post,
    path = "/api/add-course",
    tag = "Profile",
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course added", body = CoursesResponse),
        (status = 400, description = "No course provided or already registered"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_course(
    user: web::ReqData<AuthenticatedUser>,
    service: web::Data<ProfileService>,
    request: web::Json<CourseRequest>,
) -> Result<HttpResponse, AppError> {
    let course = request.course.as_deref().unwrap_or_default();
    log::info!("➕ POST /api/add-course - '{}' for user {}", course, user.user_id);

    match service.add_course(&user.user_id, &request).await {
        Ok(response) => {
            log::info!("✅ Course added: {} ({} total)", course, response.courses.len());
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::warn!("⚠️ Failed to add course '{}': {}", course, e);
            Err(e)
        }
    }
}

/// POST /api/remove-course - Drops every exact match; absent courses are not an error
#[utoipa::path(
    post,
    path = "/api/remove-course",
    tag = "Profile",
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course removed", body = CoursesResponse),
        (status = 400, description = "No course provided"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_course(
    user: web::ReqData<AuthenticatedUser>,
    service: web::Data<ProfileService>,
    request: web::Json<CourseRequest>,
) -> Result<HttpResponse, AppError> {
    let course = request.course.as_deref().unwrap_or_default();
    log::info!("🗑️  POST /api/remove-course - '{}' for user {}", course, user.user_id);

    match service.remove_course(&user.user_id, &request).await {
        Ok(response) => {
            log::info!("✅ Course removed: {} ({} left)", course, response.courses.len());
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::warn!("⚠️ Failed to remove course '{}': {}", course, e);
            Err(e)
        }
    }
}

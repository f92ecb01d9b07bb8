use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::database::{StoreError, UserStore};
use crate::models::{PublicUser, User, UserProfile};
use crate::services::auth_service::AuthService;
use crate::utils::AppError;

// Request/Response structures
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CourseRequest {
    #[serde(default)]
    pub course: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CoursesResponse {
    pub message: String,
    pub courses: Vec<String>,
}

/// Treats absent and empty strings alike.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Logs the underlying failure and hides it behind a per-operation message.
fn server_error(context: &'static str) -> impl Fn(StoreError) -> AppError {
    move |e| {
        log::error!("❌ {}: {}", context, e);
        AppError::Internal(context)
    }
}

/// Registration, login and course list operations over a user store.
pub struct ProfileService {
    store: Arc<dyn UserStore>,
    auth: AuthService,
}

impl ProfileService {
    pub fn new(store: Arc<dyn UserStore>, auth: AuthService) -> Self {
        Self { store, auth }
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
        const FAILED: &str = "Registration failed";

        let (full_name, email, password) = match (
            non_empty(&request.full_name),
            non_empty(&request.email),
            non_empty(&request.password),
        ) {
            (Some(n), Some(e), Some(p)) => (n, e, p),
            _ => return Err(AppError::BadRequest("Missing fields")),
        };

        if self
            .store
            .find_by_email(email)
            .await
            .map_err(server_error(FAILED))?
            .is_some()
        {
            return Err(AppError::Conflict("User already exists"));
        }

        let hashed = self.auth.hash_password(password).await.map_err(|e| {
            log::error!("❌ {}: {}", FAILED, e);
            AppError::Internal(FAILED)
        })?;

        let user = match self
            .store
            .create(User::new(full_name.to_string(), email.to_string(), hashed))
            .await
        {
            Ok(user) => user,
            // Lost a race with a concurrent registration
            Err(StoreError::DuplicateEmail) => {
                return Err(AppError::Conflict("User already exists"))
            }
            Err(e) => return Err(server_error(FAILED)(e)),
        };

        self.auth_response(&user, FAILED)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
        const FAILED: &str = "Login failed";

        let (email, password) = match (non_empty(&request.email), non_empty(&request.password)) {
            (Some(e), Some(p)) => (e, p),
            _ => return Err(AppError::BadRequest("Missing fields")),
        };

        let user = self
            .store
            .find_by_email(email)
            .await
            .map_err(server_error(FAILED))?
            .ok_or(AppError::InvalidCredentials)?;

        let valid = self
            .auth
            .verify_password(password, &user.password)
            .await
            .map_err(|e| {
                log::error!("❌ {}: {}", FAILED, e);
                AppError::Internal(FAILED)
            })?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        self.auth_response(&user, FAILED)
    }

    pub async fn dashboard(&self, user_id: &str) -> Result<UserProfile, AppError> {
        let user = self.load_user(user_id, "Server error").await?;
        Ok(user.profile())
    }

    pub async fn add_course(
        &self,
        user_id: &str,
        request: &CourseRequest,
    ) -> Result<CoursesResponse, AppError> {
        const FAILED: &str = "Failed to add course";

        let course = non_empty(&request.course).ok_or(AppError::BadRequest("No course provided"))?;
        let mut user = self.load_user(user_id, FAILED).await?;

        if !user.add_course(course) {
            return Err(AppError::Conflict("Already registered"));
        }

        self.store.save(&user).await.map_err(server_error(FAILED))?;

        Ok(CoursesResponse {
            message: "Course added".to_string(),
            courses: user.courses,
        })
    }

    /// Removing a course that is not in the list succeeds and leaves it unchanged.
    pub async fn remove_course(
        &self,
        user_id: &str,
        request: &CourseRequest,
    ) -> Result<CoursesResponse, AppError> {
        const FAILED: &str = "Failed to remove course";

        let course = non_empty(&request.course).ok_or(AppError::BadRequest("No course provided"))?;
        let mut user = self.load_user(user_id, FAILED).await?;

        user.remove_course(course);
        self.store.save(&user).await.map_err(server_error(FAILED))?;

        Ok(CoursesResponse {
            message: "Course removed".to_string(),
            courses: user.courses,
        })
    }

    async fn load_user(&self, user_id: &str, context: &'static str) -> Result<User, AppError> {
        self.store
            .find_by_id(user_id)
            .await
            .map_err(server_error(context))?
            .ok_or(AppError::NotFound("User not found"))
    }

    fn auth_response(&self, user: &User, context: &'static str) -> Result<AuthResponse, AppError> {
        let token = self.auth.issue_token(&user.user_id()).map_err(|e| {
            log::error!("❌ {}: {}", context, e);
            AppError::Internal(context)
        })?;

        Ok(AuthResponse {
            token,
            user: user.public_view(),
        })
    }
}

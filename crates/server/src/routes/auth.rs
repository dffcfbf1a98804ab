use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use common::types::ApiResponse;
use configs::RateLimitConfig;
use sea_orm::DatabaseConnection;
use service::auth::{
    domain::{AdminUser, LoginInput, SignupInput},
    repo::SeaOrmAdminRepository,
    AuthService,
};

use crate::errors::JsonApiError;
use crate::extract::AppJson;
use crate::rate_limit::LoginLimiter;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAdminRepository>>,
    pub login_limiter: Arc<LoginLimiter>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, rate_limit: &RateLimitConfig) -> Self {
        let repo = Arc::new(SeaOrmAdminRepository::new(db.clone()));
        Self {
            db,
            auth: Arc::new(AuthService::new(repo)),
            login_limiter: Arc::new(LoginLimiter::from_config(rate_limit)),
        }
    }
}

#[utoipa::path(post, path = "/adminSignup", tag = "auth", request_body = crate::openapi::AdminCredentialsDoc, responses((status = 201, description = "Created", body = crate::openapi::AdminDoc), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn admin_signup(
    State(state): State<ServerState>,
    AppJson(input): AppJson<SignupInput>,
) -> Result<(StatusCode, Json<ApiResponse<AdminUser>>), JsonApiError> {
    let admin = state.auth.signup(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(admin))))
}

#[utoipa::path(post, path = "/adminLogin", tag = "auth", request_body = crate::openapi::AdminCredentialsDoc, responses((status = 200, description = "Logged In", body = crate::openapi::AdminDoc), (status = 401, description = "Unauthorized"), (status = 429, description = "Too Many Requests")))]
pub async fn admin_login(
    State(state): State<ServerState>,
    AppJson(input): AppJson<LoginInput>,
) -> Result<Json<ApiResponse<AdminUser>>, JsonApiError> {
    let admin = state.auth.login(input).await?;
    Ok(Json(ApiResponse::ok(admin)))
}

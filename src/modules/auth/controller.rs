use axum::Json;
use axum::extract::State;
use serde_json::json;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

use super::model::{
    ForgotPasswordRequest, LoginData, LoginRequest, RegisterRequestDto, ResetPasswordRequest, User,
};
use super::service::AuthService;

/// Shape of every error body.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 200, description = "User registered successfully", body = User),
        (status = 400, description = "Validation error or email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = AuthService::register_user(&state.db, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "User registered successfully",
        user,
    )))
}

/// Login and receive a JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginData),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginData>>, AppError> {
    let data = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(ApiResponse::with_message("Login successful", data)))
}

/// Current authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let user = AuthService::get_user(&state.db, auth_user.user_id()?).await?;
    Ok(Json(ApiResponse::data(json!({ "user": user }))))
}

/// Logout (stateless; tokens simply expire)
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout successful")
    ),
    tag = "Authentication"
)]
#[instrument]
pub async fn logout() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Logout successful"))
}

/// Request a password reset
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link sent if the account exists"),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    AuthService::forgot_password(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(ApiResponse::message(
        "If an account with that email exists, a password reset link has been sent",
    )))
}

/// Reset password using a reset token
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset successful"),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    AuthService::reset_password(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(ApiResponse::message("Password reset successful")))
}

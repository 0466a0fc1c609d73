use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::teachers::model::{
    CreateTeacherDto, Teacher, TeacherFilterParams, UpdateTeacherDto,
};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/teachers",
    params(TeacherFilterParams),
    responses(
        (status = 200, description = "List of teachers", body = [Teacher]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_teachers(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<TeacherFilterParams>,
) -> Result<Json<ApiResponse<Vec<Teacher>>>, AppError> {
    let teachers = TeacherService::get_teachers(&state.db, filters).await?;
    Ok(Json(ApiResponse::data(teachers)))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_teacher(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Teacher>>, AppError> {
    let teacher = TeacherService::get_teacher_by_id(&state.db, id).await?;
    Ok(Json(ApiResponse::data(teacher)))
}

#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 200, description = "Teacher added successfully", body = Teacher),
        (status = 400, description = "Validation error or duplicate email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<Json<ApiResponse<Teacher>>, AppError> {
    check_admin(&auth_user)?;

    let teacher = TeacherService::create_teacher(&state.db, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Teacher added successfully",
        teacher,
    )))
}

#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated successfully", body = Teacher),
        (status = 400, description = "Validation error or duplicate email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<ApiResponse<Teacher>>, AppError> {
    check_admin(&auth_user)?;

    let teacher = TeacherService::update_teacher(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Teacher updated successfully",
        teacher,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    check_admin(&auth_user)?;

    TeacherService::delete_teacher(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Teacher deleted successfully")))
}

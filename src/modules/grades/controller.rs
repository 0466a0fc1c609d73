use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::grades::model::{CreateGradeDto, Grade, GradeWithSubjects, UpdateGradeDto};
use crate::modules::grades::service::GradeService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/grades",
    responses(
        (status = 200, description = "List of grades with subject details", body = [GradeWithSubjects]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_grades(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<ApiResponse<Vec<GradeWithSubjects>>>, AppError> {
    let grades = GradeService::get_grades(&state.db).await?;
    Ok(Json(ApiResponse::data(grades)))
}

#[utoipa::path(
    get,
    path = "/api/grades/{id}",
    params(("id" = Uuid, Path, description = "Grade ID")),
    responses(
        (status = 200, description = "Grade details", body = GradeWithSubjects),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Grade not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_grade(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<GradeWithSubjects>>, AppError> {
    let grade = GradeService::get_grade_by_id(&state.db, id).await?;
    Ok(Json(ApiResponse::data(grade)))
}

#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = CreateGradeDto,
    responses(
        (status = 200, description = "Grade added successfully", body = Grade),
        (status = 400, description = "Validation error or duplicate name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_grade(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateGradeDto>,
) -> Result<Json<ApiResponse<Grade>>, AppError> {
    check_admin(&auth_user)?;

    let grade = GradeService::create_grade(&state.db, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Grade added successfully",
        grade,
    )))
}

#[utoipa::path(
    put,
    path = "/api/grades/{id}",
    params(("id" = Uuid, Path, description = "Grade ID")),
    request_body = UpdateGradeDto,
    responses(
        (status = 200, description = "Grade updated successfully", body = Grade),
        (status = 400, description = "Validation error or duplicate name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Grade not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_grade(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateGradeDto>,
) -> Result<Json<ApiResponse<Grade>>, AppError> {
    check_admin(&auth_user)?;

    let grade = GradeService::update_grade(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Grade updated successfully",
        grade,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/grades/{id}",
    params(("id" = Uuid, Path, description = "Grade ID")),
    responses(
        (status = 200, description = "Grade deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Grade not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_grade(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    check_admin(&auth_user)?;

    GradeService::delete_grade(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Grade deleted successfully")))
}

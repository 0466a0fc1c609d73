use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::subjects::model::{
    CreateSubjectDto, Subject, SubjectFilterParams, UpdateSubjectDto,
};
use crate::modules::subjects::service::SubjectService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/subjects",
    params(SubjectFilterParams),
    responses(
        (status = 200, description = "List of subjects", body = [Subject]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_subjects(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<SubjectFilterParams>,
) -> Result<Json<ApiResponse<Vec<Subject>>>, AppError> {
    let subjects = SubjectService::get_subjects(&state.db, params).await?;
    Ok(Json(ApiResponse::data(subjects)))
}

#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject details", body = Subject),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_subject(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Subject>>, AppError> {
    let subject = SubjectService::get_subject_by_id(&state.db, id).await?;
    Ok(Json(ApiResponse::data(subject)))
}

#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = CreateSubjectDto,
    responses(
        (status = 200, description = "Subject added successfully", body = Subject),
        (status = 400, description = "Validation error or duplicate code", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<Json<ApiResponse<Subject>>, AppError> {
    check_admin(&auth_user)?;

    let subject = SubjectService::create_subject(&state.db, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Subject added successfully",
        subject,
    )))
}

#[utoipa::path(
    put,
    path = "/api/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated successfully", body = Subject),
        (status = 400, description = "Validation error or duplicate code", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectDto>,
) -> Result<Json<ApiResponse<Subject>>, AppError> {
    check_admin(&auth_user)?;

    let subject = SubjectService::update_subject(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Subject updated successfully",
        subject,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject deleted successfully"),
        (status = 400, description = "Subject is referenced by a grade", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    check_admin(&auth_user)?;

    SubjectService::delete_subject(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Subject deleted successfully")))
}

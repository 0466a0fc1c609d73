use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::timetable::model::{
    CreateTimetableEntryDto, TimetableEntry, TimetableEntryDetailed, TimetableFilterParams,
    UpdateTimetableEntryDto,
};
use crate::modules::timetable::service::TimetableService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/timetable",
    params(TimetableFilterParams),
    responses(
        (status = 200, description = "Timetable entries", body = [TimetableEntryDetailed]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_timetable(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<TimetableFilterParams>,
) -> Result<Json<ApiResponse<Vec<TimetableEntryDetailed>>>, AppError> {
    let entries = TimetableService::get_entries(&state.db, filters).await?;
    Ok(Json(ApiResponse::data(entries)))
}

#[utoipa::path(
    get,
    path = "/api/timetable/{id}",
    params(("id" = Uuid, Path, description = "Timetable entry ID")),
    responses(
        (status = 200, description = "Timetable entry details", body = TimetableEntryDetailed),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Timetable entry not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_timetable_entry(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TimetableEntryDetailed>>, AppError> {
    let entry = TimetableService::get_entry_by_id(&state.db, id).await?;
    Ok(Json(ApiResponse::data(entry)))
}

#[utoipa::path(
    post,
    path = "/api/timetable",
    request_body = CreateTimetableEntryDto,
    responses(
        (status = 200, description = "Timetable entry added successfully", body = TimetableEntry),
        (status = 400, description = "Validation error or unknown reference", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 409, description = "Slot conflict", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_timetable_entry(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTimetableEntryDto>,
) -> Result<Json<ApiResponse<TimetableEntry>>, AppError> {
    check_admin(&auth_user)?;

    let entry = TimetableService::create_entry(&state.db, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Timetable entry added successfully",
        entry,
    )))
}

#[utoipa::path(
    put,
    path = "/api/timetable/{id}",
    params(("id" = Uuid, Path, description = "Timetable entry ID")),
    request_body = UpdateTimetableEntryDto,
    responses(
        (status = 200, description = "Timetable entry updated successfully", body = TimetableEntry),
        (status = 400, description = "Validation error or unknown reference", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Timetable entry not found", body = ErrorResponse),
        (status = 409, description = "Slot conflict", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_timetable_entry(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTimetableEntryDto>,
) -> Result<Json<ApiResponse<TimetableEntry>>, AppError> {
    check_admin(&auth_user)?;

    let entry = TimetableService::update_entry(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Timetable entry updated successfully",
        entry,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/timetable/{id}",
    params(("id" = Uuid, Path, description = "Timetable entry ID")),
    responses(
        (status = 200, description = "Timetable entry deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Timetable entry not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_timetable_entry(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    check_admin(&auth_user)?;

    TimetableService::delete_entry(&state.db, id).await?;
    Ok(Json(ApiResponse::message(
        "Timetable entry deleted successfully",
    )))
}

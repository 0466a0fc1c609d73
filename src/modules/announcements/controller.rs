use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_admin;
use crate::modules::announcements::model::{
    Announcement, AnnouncementFilterParams, AnnouncementWithAuthor, CreateAnnouncementDto,
    UpdateAnnouncementDto,
};
use crate::modules::announcements::service::AnnouncementService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/announcements",
    params(AnnouncementFilterParams),
    responses(
        (status = 200, description = "List of announcements", body = [AnnouncementWithAuthor]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_announcements(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<AnnouncementFilterParams>,
) -> Result<Json<ApiResponse<Vec<AnnouncementWithAuthor>>>, AppError> {
    let announcements = AnnouncementService::get_announcements(&state.db, filters).await?;
    Ok(Json(ApiResponse::data(announcements)))
}

#[utoipa::path(
    get,
    path = "/api/announcements/{id}",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement details", body = AnnouncementWithAuthor),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_announcement(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AnnouncementWithAuthor>>, AppError> {
    let announcement = AnnouncementService::get_announcement_by_id(&state.db, id).await?;
    Ok(Json(ApiResponse::data(announcement)))
}

#[utoipa::path(
    post,
    path = "/api/announcements",
    request_body = CreateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement added successfully", body = Announcement),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_announcement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateAnnouncementDto>,
) -> Result<Json<ApiResponse<Announcement>>, AppError> {
    check_admin(&auth_user)?;
    let created_by = auth_user.user_id()?;

    let announcement = AnnouncementService::create_announcement(&state.db, dto, created_by).await?;
    Ok(Json(ApiResponse::with_message(
        "Announcement added successfully",
        announcement,
    )))
}

#[utoipa::path(
    put,
    path = "/api/announcements/{id}",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    request_body = UpdateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement updated successfully", body = Announcement),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_announcement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAnnouncementDto>,
) -> Result<Json<ApiResponse<Announcement>>, AppError> {
    check_admin(&auth_user)?;

    let announcement = AnnouncementService::update_announcement(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Announcement updated successfully",
        announcement,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_announcement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    check_admin(&auth_user)?;

    AnnouncementService::delete_announcement(&state.db, id).await?;
    Ok(Json(ApiResponse::message(
        "Announcement deleted successfully",
    )))
}

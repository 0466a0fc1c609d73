use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::events::model::{CreateEventDto, Event, EventFilterParams, UpdateEventDto};
use crate::modules::events::service::EventService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/calendar",
    params(EventFilterParams),
    responses(
        (status = 200, description = "List of events", body = [Event]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_events(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<EventFilterParams>,
) -> Result<Json<ApiResponse<Vec<Event>>>, AppError> {
    let events = EventService::get_events(&state.db, filters).await?;
    Ok(Json(ApiResponse::data(events)))
}

#[utoipa::path(
    get,
    path = "/api/calendar/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_event(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Event>>, AppError> {
    let event = EventService::get_event_by_id(&state.db, id).await?;
    Ok(Json(ApiResponse::data(event)))
}

#[utoipa::path(
    post,
    path = "/api/calendar",
    request_body = CreateEventDto,
    responses(
        (status = 200, description = "Event added successfully", body = Event),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateEventDto>,
) -> Result<Json<ApiResponse<Event>>, AppError> {
    check_admin(&auth_user)?;
    let created_by = auth_user.user_id()?;

    let event = EventService::create_event(&state.db, dto, created_by).await?;
    Ok(Json(ApiResponse::with_message(
        "Event added successfully",
        event,
    )))
}

#[utoipa::path(
    put,
    path = "/api/calendar/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Event updated successfully", body = Event),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateEventDto>,
) -> Result<Json<ApiResponse<Event>>, AppError> {
    check_admin(&auth_user)?;

    let event = EventService::update_event(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Event updated successfully",
        event,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/calendar/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    check_admin(&auth_user)?;

    EventService::delete_event(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Event deleted successfully")))
}

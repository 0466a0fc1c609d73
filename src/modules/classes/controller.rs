use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::classes::model::{
    Class, ClassFilterParams, ClassWithTeacher, CreateClassDto, UpdateClassDto,
};
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/classes",
    params(ClassFilterParams),
    responses(
        (status = 200, description = "List of classes", body = [ClassWithTeacher]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_classes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<ClassFilterParams>,
) -> Result<Json<ApiResponse<Vec<ClassWithTeacher>>>, AppError> {
    let classes = ClassService::get_classes(&state.db, filters).await?;
    Ok(Json(ApiResponse::data(classes)))
}

#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = ClassWithTeacher),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_class(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ClassWithTeacher>>, AppError> {
    let class = ClassService::get_class_by_id(&state.db, id).await?;
    Ok(Json(ApiResponse::data(class)))
}

#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassDto,
    responses(
        (status = 200, description = "Class added successfully", body = Class),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<Json<ApiResponse<Class>>, AppError> {
    check_admin(&auth_user)?;

    let class = ClassService::create_class(&state.db, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Class added successfully",
        class,
    )))
}

#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated successfully", body = Class),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<ApiResponse<Class>>, AppError> {
    check_admin(&auth_user)?;

    let class = ClassService::update_class(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Class updated successfully",
        class,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class deleted successfully"),
        (status = 400, description = "Class still has enrolled students", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    check_admin(&auth_user)?;

    ClassService::delete_class(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Class deleted successfully")))
}

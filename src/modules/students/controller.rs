use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::model::{
    CreateStudentDto, Student, StudentFilterParams, StudentWithClass, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "List of students", body = [StudentWithClass]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_students(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<StudentFilterParams>,
) -> Result<Json<ApiResponse<Vec<StudentWithClass>>>, AppError> {
    let students = StudentService::get_students(&state.db, filters).await?;
    Ok(Json(ApiResponse::data(students)))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = StudentWithClass),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_student(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StudentWithClass>>, AppError> {
    let student = StudentService::get_student_by_id(&state.db, id).await?;
    Ok(Json(ApiResponse::data(student)))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 200, description = "Student added successfully", body = Student),
        (status = 400, description = "Validation error, duplicate admission number or full class", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<Json<ApiResponse<Student>>, AppError> {
    check_admin(&auth_user)?;

    let student = StudentService::create_student(&state.db, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Student added successfully",
        student,
    )))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated successfully", body = Student),
        (status = 400, description = "Validation error, duplicate admission number or full class", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<ApiResponse<Student>>, AppError> {
    check_admin(&auth_user)?;

    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Student updated successfully",
        student,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    check_admin(&auth_user)?;

    StudentService::delete_student(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Student deleted successfully")))
}

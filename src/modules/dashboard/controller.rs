use axum::{Json, extract::State};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::dashboard::model::DashboardStats;
use crate::modules::dashboard::service::DashboardService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Aggregated dashboard statistics", body = DashboardStats),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let stats = DashboardService::get_stats(&state.db).await?;
    Ok(Json(ApiResponse::data(stats)))
}

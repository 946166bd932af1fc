//! Admin reporting handlers.

use axum::Json;
use axum::extract::{Query, State};

use roomhub_service::room::OccupancyReport;

use crate::dto::request::OccupancyQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/reports/occupancy
pub async fn occupancy(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<OccupancyQuery>,
) -> Result<Json<ApiResponse<OccupancyReport>>, ApiError> {
    let report = state.room_service.occupancy(&auth, query.date).await?;
    Ok(Json(ApiResponse::ok(report)))
}

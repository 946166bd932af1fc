//! Admin guest registry handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use roomhub_core::types::pagination::PageResponse;
use roomhub_entity::guest::Guest;
use roomhub_service::guest::CreateGuestRequest;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/guests
pub async fn list_guests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Guest>>>, ApiError> {
    let page = pagination.into_page_request();
    let guests = state.guest_service.list(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(guests)))
}

/// POST /api/admin/guests
pub async fn create_guest(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateGuestRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Guest>>), ApiError> {
    let guest = state.guest_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(guest))))
}

/// GET /api/admin/guests/{id}
pub async fn get_guest(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Guest>>, ApiError> {
    let guest = state.guest_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(guest)))
}

//! Room handlers: inventory listing and availability lookups.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use roomhub_core::types::pagination::PageResponse;
use roomhub_entity::room::Room;
use roomhub_service::room::RoomAvailability;

use crate::dto::request::{RoomFilter, StayQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/rooms
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<RoomFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Room>>>, ApiError> {
    let page = pagination.into_page_request();
    let rooms = state.room_service.list(&auth, filter.status, &page).await?;
    Ok(Json(ApiResponse::ok(rooms)))
}

/// GET /api/rooms/available
pub async fn available(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(stay): Query<StayQuery>,
) -> Result<Json<ApiResponse<Vec<Room>>>, ApiError> {
    let rooms = state
        .room_service
        .available_rooms(&auth, stay.from, stay.to)
        .await?;
    Ok(Json(ApiResponse::ok(rooms)))
}

/// GET /api/rooms/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let room = state.room_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// GET /api/rooms/{id}/availability
pub async fn availability(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(stay): Query<StayQuery>,
) -> Result<Json<ApiResponse<RoomAvailability>>, ApiError> {
    let availability = state
        .room_service
        .availability(&auth, id, stay.from, stay.to)
        .await?;
    Ok(Json(ApiResponse::ok(availability)))
}

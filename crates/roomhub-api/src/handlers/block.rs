//! Block booking handlers: agency multi-room bookings.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use roomhub_core::types::pagination::PageResponse;
use roomhub_entity::block::BlockBooking;
use roomhub_entity::reservation::Reservation;
use roomhub_service::block::CreateBlockBookingRequest;

use crate::dto::request::BlockFilter;
use crate::dto::response::{ApiResponse, BlockBookingResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/block-bookings
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBlockBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BlockBookingResponse>>), ApiError> {
    let result = state.block_service.create(&auth, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(BlockBookingResponse {
            message: "Block booking created".to_string(),
            block: result.block,
            discount: result.discount,
        })),
    ))
}

/// GET /api/block-bookings
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<BlockFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<BlockBooking>>>, ApiError> {
    let page = pagination.into_page_request();
    let blocks = state
        .block_service
        .list(&auth, filter.status, filter.agency_id, &page)
        .await?;
    Ok(Json(ApiResponse::ok(blocks)))
}

/// GET /api/block-bookings/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BlockBooking>>, ApiError> {
    let block = state.block_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(block)))
}

/// GET /api/block-bookings/{id}/reservations
pub async fn members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Reservation>>>, ApiError> {
    let reservations = state.block_service.members(&auth, id).await?;
    Ok(Json(ApiResponse::ok(reservations)))
}

/// POST /api/block-bookings/{id}/confirm
pub async fn confirm(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BlockBooking>>, ApiError> {
    let block = state.block_service.confirm(&auth, id).await?;
    Ok(Json(ApiResponse::ok(block)))
}

/// POST /api/block-bookings/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BlockBooking>>, ApiError> {
    let block = state.block_service.cancel(&auth, id).await?;
    Ok(Json(ApiResponse::ok(block)))
}

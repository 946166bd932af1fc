//! Admin room management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use roomhub_entity::room::Room;
use roomhub_service::room::{CreateRoomRequest, UpdateRoomRequest};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/admin/rooms
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Room>>), ApiError> {
    let room = state.room_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(room))))
}

/// PUT /api/admin/rooms/{id}
pub async fn update_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoomRequest>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let room = state.room_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(room)))
}

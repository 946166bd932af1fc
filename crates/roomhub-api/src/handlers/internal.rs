//! Internal operational endpoints, authenticated by a shared secret
//! rather than a user session.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use tracing::info;

use roomhub_core::error::AppError;

use crate::dto::response::{ApiResponse, SweepResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /internal/sweep
///
/// Manually triggers the unconfirmed-reservation sweep that the worker
/// otherwise runs on its cron schedule. The caller must present the
/// worker's sweep secret in the `X-Sweep-Secret` header.
pub async fn sweep(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<SweepResponse>>, ApiError> {
    let presented = headers
        .get("x-sweep-secret")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing X-Sweep-Secret header"))?;

    if presented != state.config.worker.sweep_secret {
        return Err(AppError::authentication("Invalid sweep secret").into());
    }

    let canceled = state
        .reservation_repo
        .sweep_unconfirmed(state.config.booking.confirmation_grace_hours)
        .await?;

    info!(reservations_canceled = canceled, "Manual sweep completed");

    Ok(Json(ApiResponse::ok(SweepResponse {
        message: "Sweep completed".to_string(),
        reservations_canceled: canceled,
    })))
}

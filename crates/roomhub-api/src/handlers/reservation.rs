//! Reservation handlers: lifecycle operations, charges, and invoices.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use roomhub_core::types::pagination::PageResponse;
use roomhub_entity::reservation::{AdditionalCharge, Reservation};
use roomhub_service::reservation::{CreateReservationRequest, UpdateReservationRequest};
use roomhub_service::checkout::CheckoutRequest;

use crate::dto::request::{AddChargeRequest, ReservationFilter};
use crate::dto::response::{ApiResponse, CheckoutResponse, InvoiceDetail};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/reservations
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Reservation>>), ApiError> {
    let reservation = state.reservation_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(reservation))))
}

/// GET /api/reservations
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<ReservationFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Reservation>>>, ApiError> {
    let page = pagination.into_page_request();
    let reservations = state
        .reservation_service
        .list(&auth, filter.status, filter.guest_id, &page)
        .await?;
    Ok(Json(ApiResponse::ok(reservations)))
}

/// GET /api/reservations/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let reservation = state.reservation_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// PUT /api/reservations/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let reservation = state.reservation_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// POST /api/reservations/{id}/confirm
pub async fn confirm(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let reservation = state.reservation_service.confirm(&auth, id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// POST /api/reservations/{id}/check-in
pub async fn check_in(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let reservation = state.reservation_service.check_in(&auth, id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// POST /api/reservations/{id}/check-out
pub async fn check_out(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, ApiError> {
    let invoice = state.checkout_service.check_out(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(CheckoutResponse {
        message: "Checked out successfully".to_string(),
        invoice,
    })))
}

/// POST /api/reservations/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let reservation = state.reservation_service.cancel(&auth, id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// POST /api/reservations/{id}/charges
pub async fn add_charge(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AddChargeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AdditionalCharge>>), ApiError> {
    let charge = state
        .reservation_service
        .add_charge(&auth, id, &req.description, req.amount)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(charge))))
}

/// GET /api/reservations/{id}/charges
pub async fn list_charges(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<AdditionalCharge>>>, ApiError> {
    let charges = state.reservation_service.charges(&auth, id).await?;
    Ok(Json(ApiResponse::ok(charges)))
}

/// GET /api/reservations/{id}/invoice
pub async fn invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvoiceDetail>>, ApiError> {
    let (invoice, line_items) = state.checkout_service.invoice(&auth, id).await?;
    Ok(Json(ApiResponse::ok(InvoiceDetail {
        invoice,
        line_items,
    })))
}

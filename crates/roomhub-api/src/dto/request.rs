//! Request bodies and query parameters specific to the HTTP layer.
//!
//! Domain-level create/update payloads live in `roomhub-service` and are
//! deserialized straight into the service request types; the structs here
//! cover authentication, filtering, and small admin actions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use roomhub_entity::block::BlockStatus;
use roomhub_entity::reservation::ReservationStatus;
use roomhub_entity::room::RoomStatus;
use roomhub_entity::user::{UserRole, UserStatus};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Add an additional charge to an in-house reservation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddChargeRequest {
    /// What the charge is for.
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    /// Charge amount.
    pub amount: Decimal,
}

/// Change a user's role (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    /// New role.
    pub role: UserRole,
}

/// Change a user's account status (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    /// New status.
    pub status: UserStatus,
}

/// Reset a user's password (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Date range for availability queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayQuery {
    /// Arrival date.
    pub from: NaiveDate,
    /// Departure date (exclusive).
    pub to: NaiveDate,
}

/// Optional filters for reservation listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    /// Restrict to a lifecycle state.
    pub status: Option<ReservationStatus>,
    /// Restrict to one guest's reservations.
    pub guest_id: Option<Uuid>,
}

/// Optional filters for block booking listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockFilter {
    /// Restrict to a lifecycle state.
    pub status: Option<BlockStatus>,
    /// Restrict to one agency's blocks.
    pub agency_id: Option<Uuid>,
}

/// Optional filters for room listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomFilter {
    /// Restrict to an operational status.
    pub status: Option<RoomStatus>,
}

/// Night selector for the occupancy report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OccupancyQuery {
    /// The night to report on (defaults to today).
    pub date: Option<NaiveDate>,
}

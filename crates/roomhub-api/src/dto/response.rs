//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomhub_entity::block::BlockBooking;
use roomhub_entity::invoice::{Invoice, InvoiceLineItem};
use roomhub_entity::user::{User, UserRole, UserStatus};
use roomhub_service::block::DiscountBreakdown;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User summary for responses. Never exposes credential fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Role.
    pub role: UserRole,
    /// Account status.
    pub status: UserStatus,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Last login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

/// Created block booking with its pricing breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct BlockBookingResponse {
    /// Message.
    pub message: String,
    /// The block booking.
    pub block: BlockBooking,
    /// How the final amount was reached.
    pub discount: DiscountBreakdown,
}

/// Check-out result with the generated invoice.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    /// Message.
    pub message: String,
    /// The settled invoice.
    pub invoice: Invoice,
}

/// An invoice together with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDetail {
    /// The invoice.
    pub invoice: Invoice,
    /// Itemized charges.
    pub line_items: Vec<InvoiceLineItem>,
}

/// Result of the unconfirmed-reservation sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResponse {
    /// Message.
    pub message: String,
    /// How many reservations were canceled.
    pub reservations_canceled: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Version.
    pub version: String,
}

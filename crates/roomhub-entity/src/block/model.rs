//! Block booking entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use roomhub_core::types::StayRange;

use super::status::BlockStatus;

/// A multi-room booking made by an agency for a single date range.
///
/// Each member room is backed by an individual [`crate::reservation::Reservation`]
/// carrying this block's id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlockBooking {
    /// Unique block identifier.
    pub id: Uuid,
    /// The booking agency (a guest record of kind `agency`).
    pub agency_id: Uuid,
    /// First night of the stay (inclusive).
    pub check_in: NaiveDate,
    /// Departure date (exclusive).
    pub check_out: NaiveDate,
    /// Number of rooms in the block.
    pub rooms_count: i32,
    /// Sum of undiscounted room charges.
    pub original_amount: Decimal,
    /// Discount applied to the block.
    pub discount_amount: Decimal,
    /// Amount payable after discount.
    pub final_amount: Decimal,
    /// Discount percentage applied (0 when ineligible).
    pub discount_percent: Decimal,
    /// Lifecycle status.
    pub status: BlockStatus,
    /// When the block was created.
    pub created_at: DateTime<Utc>,
    /// When the block was last updated.
    pub updated_at: DateTime<Utc>,
}

impl BlockBooking {
    /// The stay interval as a half-open range.
    pub fn stay(&self) -> StayRange {
        StayRange {
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }
}

/// Data required to create a new block booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlockBooking {
    /// The booking agency.
    pub agency_id: Uuid,
    /// Rooms to reserve.
    pub room_ids: Vec<Uuid>,
    /// First night of the stay.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Guests per room.
    pub guests_per_room: i32,
    /// Free-form requests applied to each member reservation.
    pub special_requests: Option<String>,
}

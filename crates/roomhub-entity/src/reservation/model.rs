//! Reservation entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use roomhub_core::types::StayRange;

use super::payment::{PaymentMethod, PaymentStatus};
use super::status::ReservationStatus;

/// A room reservation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: Uuid,
    /// The guest who made the reservation.
    pub guest_id: Uuid,
    /// The reserved room.
    pub room_id: Uuid,
    /// First night of the stay (inclusive).
    pub check_in: NaiveDate,
    /// Departure date (exclusive).
    pub check_out: NaiveDate,
    /// Number of guests staying.
    pub guests: i32,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Settlement status of the balance.
    pub payment_status: PaymentStatus,
    /// Payment method, set at checkout.
    pub payment_method: Option<PaymentMethod>,
    /// Total amount for the stay including additional charges.
    pub total_amount: Decimal,
    /// Free-form guest requests.
    pub special_requests: Option<String>,
    /// Block booking this reservation belongs to (if any).
    pub block_id: Option<Uuid>,
    /// When the reservation was confirmed (None = awaiting confirmation).
    pub confirmed_at: Option<DateTime<Utc>>,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// The stay interval as a half-open range.
    ///
    /// Rows always satisfy `check_out > check_in` (enforced at insert),
    /// so the conversion cannot fail.
    pub fn stay(&self) -> StayRange {
        StayRange {
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }

    /// Whether this reservation still holds its room.
    pub fn blocks_room(&self) -> bool {
        self.status.blocks_room()
    }

    /// Whether the guest has confirmed the reservation.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }
}

/// Data required to create a new reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservation {
    /// The guest making the reservation.
    pub guest_id: Uuid,
    /// The room to reserve.
    pub room_id: Uuid,
    /// First night of the stay.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Number of guests staying.
    pub guests: i32,
    /// Free-form guest requests.
    pub special_requests: Option<String>,
    /// Block booking this reservation belongs to.
    pub block_id: Option<Uuid>,
}

/// Data for updating an existing reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReservation {
    /// The reservation to update.
    pub id: Uuid,
    /// New check-in date.
    pub check_in: Option<NaiveDate>,
    /// New check-out date.
    pub check_out: Option<NaiveDate>,
    /// New guest count.
    pub guests: Option<i32>,
    /// New special requests.
    pub special_requests: Option<String>,
}

//! Room entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::RoomStatus;

/// A bookable hotel room.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Unique room identifier.
    pub id: Uuid,
    /// Human-facing room number (e.g., `"204"`, `"12B"`).
    pub room_number: String,
    /// Room category (e.g., `"single"`, `"double"`, `"suite"`).
    pub room_type: String,
    /// Nightly rate.
    pub rate_per_night: Decimal,
    /// Maximum number of guests.
    pub capacity: i32,
    /// Operational status.
    pub status: RoomStatus,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Check whether new reservations may be taken for this room.
    pub fn is_bookable(&self) -> bool {
        self.status.is_bookable()
    }

    /// Check whether the room can hold the given party size.
    pub fn fits(&self, guests: i32) -> bool {
        guests >= 1 && guests <= self.capacity
    }
}

/// Data required to create a new room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoom {
    /// Human-facing room number.
    pub room_number: String,
    /// Room category.
    pub room_type: String,
    /// Nightly rate.
    pub rate_per_night: Decimal,
    /// Maximum number of guests.
    pub capacity: i32,
}

/// Data for updating an existing room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoom {
    /// The room to update.
    pub id: Uuid,
    /// New room category.
    pub room_type: Option<String>,
    /// New nightly rate.
    pub rate_per_night: Option<Decimal>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// New operational status.
    pub status: Option<RoomStatus>,
}

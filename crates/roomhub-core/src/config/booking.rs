//! Booking policy configuration.

use serde::{Deserialize, Serialize};

/// Reservation and block-booking policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Minimum number of rooms in a block booking to qualify for the
    /// group discount.
    #[serde(default = "default_discount_min_rooms")]
    pub discount_min_rooms: u32,
    /// Group discount percentage applied when the threshold is met.
    #[serde(default = "default_discount_percent")]
    pub discount_percent: u32,
    /// Minimum number of full days before check-in for a block booking
    /// to remain cancellable.
    #[serde(default = "default_block_cancel_min_days")]
    pub block_cancel_min_days: i64,
    /// Hours an unconfirmed reservation is held before the sweep job
    /// auto-cancels it.
    #[serde(default = "default_confirmation_grace_hours")]
    pub confirmation_grace_hours: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            discount_min_rooms: default_discount_min_rooms(),
            discount_percent: default_discount_percent(),
            block_cancel_min_days: default_block_cancel_min_days(),
            confirmation_grace_hours: default_confirmation_grace_hours(),
        }
    }
}

fn default_discount_min_rooms() -> u32 {
    3
}

fn default_discount_percent() -> u32 {
    15
}

fn default_block_cancel_min_days() -> i64 {
    7
}

fn default_confirmation_grace_hours() -> i64 {
    48
}

//! Reservation lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a reservation.
///
/// Valid transitions: `Reserved` → `CheckedIn` → `CheckedOut`, and
/// `Reserved` → `Canceled`. `CheckedOut` and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Booked, room held, guest not yet arrived.
    Reserved,
    /// Guest is currently occupying the room.
    CheckedIn,
    /// Stay completed and settled.
    CheckedOut,
    /// Canceled before check-in; the room is released.
    Canceled,
}

impl ReservationStatus {
    /// Check if the reservation is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Canceled)
    }

    /// Check whether the reservation still holds its room.
    ///
    /// Canceled reservations release the room; every other status keeps
    /// its date range blocked for overlap purposes.
    pub fn blocks_room(&self) -> bool {
        !matches!(self, Self::Canceled)
    }

    /// Check whether a transition to `next` is allowed.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Reserved, Self::CheckedIn)
                | (Self::CheckedIn, Self::CheckedOut)
                | (Self::Reserved, Self::Canceled)
        )
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = roomhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reserved" => Ok(Self::Reserved),
            "checked_in" => Ok(Self::CheckedIn),
            "checked_out" => Ok(Self::CheckedOut),
            "canceled" => Ok(Self::Canceled),
            _ => Err(roomhub_core::AppError::validation(format!(
                "Invalid reservation status: '{s}'. Expected one of: reserved, checked_in, checked_out, canceled"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert!(ReservationStatus::Reserved.can_transition_to(ReservationStatus::CheckedIn));
        assert!(ReservationStatus::Reserved.can_transition_to(ReservationStatus::Canceled));
        assert!(ReservationStatus::CheckedIn.can_transition_to(ReservationStatus::CheckedOut));
        assert!(!ReservationStatus::CheckedIn.can_transition_to(ReservationStatus::Canceled));
        assert!(!ReservationStatus::CheckedOut.can_transition_to(ReservationStatus::Reserved));
        assert!(!ReservationStatus::Canceled.can_transition_to(ReservationStatus::CheckedIn));
    }

    #[test]
    fn test_terminal_states() {
        assert!(ReservationStatus::CheckedOut.is_terminal());
        assert!(ReservationStatus::Canceled.is_terminal());
        assert!(!ReservationStatus::Reserved.is_terminal());
    }

    #[test]
    fn test_room_blocking() {
        assert!(ReservationStatus::Reserved.blocks_room());
        assert!(ReservationStatus::CheckedIn.blocks_room());
        assert!(!ReservationStatus::Canceled.blocks_room());
    }
}

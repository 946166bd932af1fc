//! Pre-insert validation of reservation requests.
//!
//! These checks are advisory: the stored procedure and the exclusion
//! constraint re-validate inside the insert transaction. Running them
//! first gives precise error messages and avoids issuing doomed inserts.

use chrono::NaiveDate;

use roomhub_core::error::AppError;
use roomhub_core::types::StayRange;
use roomhub_entity::reservation::Reservation;
use roomhub_entity::room::Room;

/// Validates reservation requests before they reach the database.
#[derive(Debug, Clone, Default)]
pub struct ReservationValidator;

impl ReservationValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates the stay dates, returning the parsed range.
    pub fn validate_stay(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<StayRange, AppError> {
        StayRange::new(check_in, check_out)
    }

    /// Validates the guest count against the room.
    pub fn validate_guests(&self, guests: i32, room: &Room) -> Result<(), AppError> {
        if guests < 1 {
            return Err(AppError::validation("Guest count must be at least 1"));
        }
        if !room.fits(guests) {
            return Err(AppError::validation(format!(
                "Room {} holds at most {} guests",
                room.room_number, room.capacity
            )));
        }
        Ok(())
    }

    /// Validates that the room can take new bookings at all.
    pub fn validate_room_bookable(&self, room: &Room) -> Result<(), AppError> {
        if !room.is_bookable() {
            return Err(AppError::validation(format!(
                "Room {} is not accepting bookings",
                room.room_number
            )));
        }
        Ok(())
    }

    /// Checks the requested stay against the room's current bookings.
    ///
    /// `existing` should contain all non-canceled reservations for the
    /// room (minus the one being updated, if any).
    pub fn validate_no_overlap(
        &self,
        stay: StayRange,
        existing: &[Reservation],
    ) -> Result<(), AppError> {
        for reservation in existing {
            if stay.overlaps(&reservation.stay()) {
                return Err(AppError::conflict(
                    "Room is not available for the requested dates",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use roomhub_entity::reservation::{PaymentStatus, ReservationStatus};
    use roomhub_entity::room::RoomStatus;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn room(capacity: i32, status: RoomStatus) -> Room {
        let now = chrono::Utc::now();
        Room {
            id: Uuid::new_v4(),
            room_number: "204".to_string(),
            room_type: "double".to_string(),
            rate_per_night: Decimal::new(12000, 2),
            capacity,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn booking(check_in: NaiveDate, check_out: NaiveDate, status: ReservationStatus) -> Reservation {
        let now = chrono::Utc::now();
        Reservation {
            id: Uuid::new_v4(),
            guest_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            check_in,
            check_out,
            guests: 2,
            status,
            payment_status: PaymentStatus::Unpaid,
            payment_method: None,
            total_amount: Decimal::ZERO,
            special_requests: None,
            block_id: None,
            confirmed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn rejects_inverted_and_zero_night_stays() {
        let v = ReservationValidator::new();
        assert!(v.validate_stay(date(2026, 9, 5), date(2026, 9, 3)).is_err());
        assert!(v.validate_stay(date(2026, 9, 5), date(2026, 9, 5)).is_err());
        assert!(v.validate_stay(date(2026, 9, 3), date(2026, 9, 5)).is_ok());
    }

    #[test]
    fn rejects_bad_guest_counts() {
        let v = ReservationValidator::new();
        let r = room(2, RoomStatus::Available);
        assert!(v.validate_guests(0, &r).is_err());
        assert!(v.validate_guests(3, &r).is_err());
        assert!(v.validate_guests(2, &r).is_ok());
    }

    #[test]
    fn rejects_unbookable_room() {
        let v = ReservationValidator::new();
        assert!(
            v.validate_room_bookable(&room(2, RoomStatus::Maintenance))
                .is_err()
        );
        assert!(
            v.validate_room_bookable(&room(2, RoomStatus::Retired))
                .is_err()
        );
        assert!(
            v.validate_room_bookable(&room(2, RoomStatus::Available))
                .is_ok()
        );
    }

    #[test]
    fn detects_overlap_with_existing_booking() {
        let v = ReservationValidator::new();
        let stay = StayRange::new(date(2026, 9, 3), date(2026, 9, 6)).unwrap();
        let existing = vec![booking(
            date(2026, 9, 5),
            date(2026, 9, 8),
            ReservationStatus::Reserved,
        )];
        assert!(v.validate_no_overlap(stay, &existing).is_err());
    }

    #[test]
    fn adjacent_booking_is_not_an_overlap() {
        let v = ReservationValidator::new();
        let stay = StayRange::new(date(2026, 9, 3), date(2026, 9, 5)).unwrap();
        let existing = vec![booking(
            date(2026, 9, 5),
            date(2026, 9, 8),
            ReservationStatus::Reserved,
        )];
        assert!(v.validate_no_overlap(stay, &existing).is_ok());
    }
}

//! Repository implementations for all RoomHub entities.

pub mod block;
pub mod guest;
pub mod invoice;
pub mod job;
pub mod reservation;
pub mod room;
pub mod session;
pub mod user;

pub use block::BlockBookingRepository;
pub use guest::GuestRepository;
pub use invoice::InvoiceRepository;
pub use job::JobRepository;
pub use reservation::ReservationRepository;
pub use room::RoomRepository;
pub use session::SessionRepository;
pub use user::UserRepository;

use roomhub_core::error::{AppError, ErrorKind};

/// Postgres error code for exclusion constraint violations.
const EXCLUSION_VIOLATION: &str = "23P01";
/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres error code raised by `RAISE EXCEPTION` in stored procedures.
const RAISE_EXCEPTION: &str = "P0001";

/// Map an error returned by a booking-domain stored procedure.
///
/// The procedures are the transactional authority: an exclusion or
/// unique violation means the room range was taken concurrently and is
/// surfaced as a conflict; a `RAISE EXCEPTION` carries a domain rule
/// violation message and is surfaced as validation.
pub(crate) fn map_procedure_error(context: &'static str, e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        match db_err.code().as_deref() {
            Some(EXCLUSION_VIOLATION) => {
                return AppError::conflict(
                    "Room is not available for the requested dates".to_string(),
                );
            }
            Some(UNIQUE_VIOLATION) => {
                return AppError::conflict(format!("Duplicate entry: {}", db_err.message()));
            }
            Some(RAISE_EXCEPTION) => {
                return AppError::validation(db_err.message().to_string());
            }
            _ => {}
        }
    }
    AppError::with_source(ErrorKind::Database, context, e)
}

//! Reservation domain entities.

pub mod charge;
pub mod model;
pub mod payment;
pub mod status;

pub use charge::AdditionalCharge;
pub use model::{CreateReservation, Reservation, UpdateReservation};
pub use payment::{PaymentMethod, PaymentStatus};
pub use status::ReservationStatus;

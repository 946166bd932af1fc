//! Agency block bookings — multi-room reservations with a group discount.

pub mod discount;
pub mod service;

pub use discount::{DiscountBreakdown, DiscountCalculator};
pub use service::{BlockBookingResult, BlockBookingService, CreateBlockBookingRequest};

//! Guest registry — traveler and agency records.

pub mod service;

pub use service::{CreateGuestRequest, GuestService};

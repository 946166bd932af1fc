//! # roomhub-service
//!
//! Business logic service layer for RoomHub. Each service orchestrates
//! repositories and authentication to implement application-level use
//! cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. There is no ambient auth
//! state: every operation receives an explicit [`RequestContext`].

pub mod block;
pub mod checkout;
pub mod context;
pub mod guest;
pub mod reservation;
pub mod room;
pub mod user;

pub use block::{BlockBookingService, DiscountCalculator};
pub use checkout::{CheckoutService, PaymentReconciler};
pub use context::RequestContext;
pub use guest::GuestService;
pub use reservation::{ReservationService, ReservationValidator};
pub use room::RoomService;
pub use user::{AdminUserService, UserService};

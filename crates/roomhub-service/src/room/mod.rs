//! Room inventory — listing, availability, and administration.

pub mod service;

pub use service::{
    CreateRoomRequest, OccupancyReport, RoomAvailability, RoomService, UpdateRoomRequest,
};

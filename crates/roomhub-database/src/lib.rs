//! # roomhub-database
//!
//! PostgreSQL connection management and the persistence gateway for
//! RoomHub. Booking-domain mutations go through stored procedures so
//! the database remains the single transactional authority for room
//! availability; reads and ambient tables use plain parameterized SQL.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use migration::run_migrations;

//! # roomhub-core
//!
//! Core crate for RoomHub. Contains configuration schemas, shared domain
//! types (stay ranges, pagination), and the unified error system.
//!
//! This crate has **no** internal dependencies on other RoomHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

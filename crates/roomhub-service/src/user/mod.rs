//! User accounts — self-service and administrative management.

pub mod admin;
pub mod service;

pub use admin::{AdminUpdateUserRequest, AdminUserService, CreateUserRequest};
pub use service::{UpdateProfileRequest, UserService};

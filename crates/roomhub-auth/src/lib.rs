//! # roomhub-auth
//!
//! Authentication, authorization, and session management for the
//! Meridian RoomHub platform.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `password` — Argon2id password hashing and policy enforcement
//! - `rbac` — Role-based access control enforcement
//! - `session` — Session lifecycle management (login, refresh, logout)

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{RbacEnforcer, RbacPolicies};
pub use session::SessionManager;

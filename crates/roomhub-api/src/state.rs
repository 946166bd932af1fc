//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use roomhub_auth::jwt::{JwtDecoder, JwtEncoder};
use roomhub_auth::password::PasswordHasher;
use roomhub_auth::rbac::RbacEnforcer;
use roomhub_auth::session::SessionManager;
use roomhub_core::config::AppConfig;

use roomhub_database::repositories::{
    BlockBookingRepository, GuestRepository, InvoiceRepository, JobRepository,
    ReservationRepository, RoomRepository, SessionRepository, UserRepository,
};

use roomhub_service::{
    AdminUserService, BlockBookingService, CheckoutService, GuestService, ReservationService,
    RoomService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,
    /// Role-based access control enforcer
    pub rbac_enforcer: Arc<RbacEnforcer>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Session repository
    pub session_repo: Arc<SessionRepository>,
    /// Room repository
    pub room_repo: Arc<RoomRepository>,
    /// Guest repository
    pub guest_repo: Arc<GuestRepository>,
    /// Reservation repository
    pub reservation_repo: Arc<ReservationRepository>,
    /// Block booking repository
    pub block_repo: Arc<BlockBookingRepository>,
    /// Invoice repository
    pub invoice_repo: Arc<InvoiceRepository>,
    /// Job repository
    pub job_repo: Arc<JobRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Reservation lifecycle service
    pub reservation_service: Arc<ReservationService>,
    /// Block booking service
    pub block_service: Arc<BlockBookingService>,
    /// Checkout and invoicing service
    pub checkout_service: Arc<CheckoutService>,
    /// Room management service
    pub room_service: Arc<RoomService>,
    /// Guest profile service
    pub guest_service: Arc<GuestService>,
    /// User self-service
    pub user_service: Arc<UserService>,
    /// Admin user management service
    pub admin_user_service: Arc<AdminUserService>,
}

//! Route definitions for the RoomHub HTTP API.
//!
//! Domain routes are organized per resource and mounted under `/api`.
//! Health probes and the internal sweep trigger live at the root so
//! that load balancers and operational tooling reach them without the
//! API prefix.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(reservation_routes())
        .merge(block_routes())
        .merge(room_routes())
        .merge(admin_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes())
        .merge(internal_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, logout, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::get_profile))
        .route("/users/me", put(handlers::user::update_profile))
        .route("/users/me/password", put(handlers::user::change_password))
        .route("/users/me/guest", get(handlers::user::own_guest_profile))
}

/// Reservation lifecycle, charges, and invoices
fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(handlers::reservation::create))
        .route("/reservations", get(handlers::reservation::list))
        .route("/reservations/{id}", get(handlers::reservation::get))
        .route("/reservations/{id}", put(handlers::reservation::update))
        .route(
            "/reservations/{id}/confirm",
            post(handlers::reservation::confirm),
        )
        .route(
            "/reservations/{id}/check-in",
            post(handlers::reservation::check_in),
        )
        .route(
            "/reservations/{id}/check-out",
            post(handlers::reservation::check_out),
        )
        .route(
            "/reservations/{id}/cancel",
            post(handlers::reservation::cancel),
        )
        .route(
            "/reservations/{id}/charges",
            post(handlers::reservation::add_charge),
        )
        .route(
            "/reservations/{id}/charges",
            get(handlers::reservation::list_charges),
        )
        .route(
            "/reservations/{id}/invoice",
            get(handlers::reservation::invoice),
        )
}

/// Agency block bookings
fn block_routes() -> Router<AppState> {
    Router::new()
        .route("/block-bookings", post(handlers::block::create))
        .route("/block-bookings", get(handlers::block::list))
        .route("/block-bookings/{id}", get(handlers::block::get))
        .route(
            "/block-bookings/{id}/reservations",
            get(handlers::block::members),
        )
        .route(
            "/block-bookings/{id}/confirm",
            post(handlers::block::confirm),
        )
        .route("/block-bookings/{id}/cancel", post(handlers::block::cancel))
}

/// Room inventory and availability
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(handlers::room::list))
        .route("/rooms/available", get(handlers::room::available))
        .route("/rooms/{id}", get(handlers::room::get))
        .route("/rooms/{id}/availability", get(handlers::room::availability))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        // Room management
        .route("/admin/rooms", post(handlers::admin::rooms::create_room))
        .route(
            "/admin/rooms/{id}",
            put(handlers::admin::rooms::update_room),
        )
        // User management
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route("/admin/users", post(handlers::admin::users::create_user))
        .route("/admin/users/{id}", get(handlers::admin::users::get_user))
        .route("/admin/users/{id}", put(handlers::admin::users::update_user))
        .route(
            "/admin/users/{id}/role",
            put(handlers::admin::users::change_role),
        )
        .route(
            "/admin/users/{id}/status",
            put(handlers::admin::users::change_status),
        )
        .route(
            "/admin/users/{id}/reset-password",
            post(handlers::admin::users::reset_password),
        )
        // Guest registry
        .route("/admin/guests", get(handlers::admin::guests::list_guests))
        .route("/admin/guests", post(handlers::admin::guests::create_guest))
        .route("/admin/guests/{id}", get(handlers::admin::guests::get_guest))
        // Reports
        .route(
            "/admin/reports/occupancy",
            get(handlers::admin::reports::occupancy),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Secret-gated operational endpoints
fn internal_routes() -> Router<AppState> {
    Router::new().route("/internal/sweep", post(handlers::internal::sweep))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}

//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use roomhub_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db = roomhub_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        let db_pool = db.into_pool();

        roomhub_database::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let user_repo = Arc::new(roomhub_database::repositories::UserRepository::new(
            db_pool.clone(),
        ));
        let session_repo = Arc::new(roomhub_database::repositories::SessionRepository::new(
            db_pool.clone(),
        ));
        let room_repo = Arc::new(roomhub_database::repositories::RoomRepository::new(
            db_pool.clone(),
        ));
        let guest_repo = Arc::new(roomhub_database::repositories::GuestRepository::new(
            db_pool.clone(),
        ));
        let reservation_repo = Arc::new(
            roomhub_database::repositories::ReservationRepository::new(db_pool.clone()),
        );
        let block_repo = Arc::new(
            roomhub_database::repositories::BlockBookingRepository::new(db_pool.clone()),
        );
        let invoice_repo = Arc::new(roomhub_database::repositories::InvoiceRepository::new(
            db_pool.clone(),
        ));
        let job_repo = Arc::new(roomhub_database::repositories::JobRepository::new(
            db_pool.clone(),
        ));

        let password_hasher = Arc::new(roomhub_auth::password::PasswordHasher::new());
        let password_validator =
            Arc::new(roomhub_auth::password::PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(roomhub_auth::jwt::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(roomhub_auth::jwt::JwtDecoder::new(&config.auth));
        let rbac_enforcer = Arc::new(roomhub_auth::rbac::RbacEnforcer::new());

        let session_manager = Arc::new(roomhub_auth::session::SessionManager::new(
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
            Arc::clone(&session_repo),
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            config.auth.clone(),
            config.session.clone(),
        ));

        let reservation_service = Arc::new(roomhub_service::ReservationService::new(
            Arc::clone(&reservation_repo),
            Arc::clone(&room_repo),
            Arc::clone(&guest_repo),
            Arc::clone(&rbac_enforcer),
        ));
        let block_service = Arc::new(roomhub_service::BlockBookingService::new(
            Arc::clone(&block_repo),
            Arc::clone(&reservation_repo),
            Arc::clone(&room_repo),
            Arc::clone(&guest_repo),
            Arc::clone(&rbac_enforcer),
            config.booking.clone(),
        ));
        let checkout_service = Arc::new(roomhub_service::CheckoutService::new(
            Arc::clone(&reservation_repo),
            Arc::clone(&room_repo),
            Arc::clone(&invoice_repo),
            Arc::clone(&rbac_enforcer),
        ));
        let room_service = Arc::new(roomhub_service::RoomService::new(
            Arc::clone(&room_repo),
            Arc::clone(&reservation_repo),
            Arc::clone(&rbac_enforcer),
        ));
        let guest_service = Arc::new(roomhub_service::GuestService::new(
            Arc::clone(&guest_repo),
            Arc::clone(&rbac_enforcer),
        ));
        let user_service = Arc::new(roomhub_service::UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&session_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&password_validator),
        ));
        let admin_user_service = Arc::new(roomhub_service::AdminUserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&session_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&password_validator),
            Arc::clone(&rbac_enforcer),
        ));

        let app_state = roomhub_api::state::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
            jwt_encoder,
            jwt_decoder,
            password_hasher,
            session_manager,
            rbac_enforcer,
            user_repo,
            session_repo,
            room_repo,
            guest_repo,
            reservation_repo,
            block_repo,
            invoice_repo,
            job_repo,
            reservation_service,
            block_service,
            checkout_service,
            room_service,
            guest_service,
            user_service,
            admin_user_service,
        };

        let router = roomhub_api::router::build_router(app_state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "invoice_line_items",
            "invoices",
            "reservation_charges",
            "reservations",
            "block_bookings",
            "jobs",
            "sessions",
            "guests",
            "rooms",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {}", table);
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a test user and return their ID
    pub async fn create_test_user(&self, username: &str, password: &str, role: &str) -> Uuid {
        let hasher = roomhub_auth::password::PasswordHasher::new();
        let hash = hasher
            .hash_password(password)
            .expect("Failed to hash password");
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO users (id, username, email, password_hash, display_name, role, status, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6::user_role, 'active'::user_status, NOW(), NOW())"#,
        )
        .bind(id)
        .bind(username)
        .bind(format!("{}@test.com", username))
        .bind(&hash)
        .bind(username)
        .bind(role)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test user");

        id
    }

    /// Create a guest record, optionally linked to a user account
    pub async fn create_test_guest(
        &self,
        full_name: &str,
        kind: &str,
        user_id: Option<Uuid>,
    ) -> Uuid {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO guests (id, full_name, email, kind, user_id, created_at, updated_at)
               VALUES ($1, $2, $3, $4::guest_kind, $5, NOW(), NOW())"#,
        )
        .bind(id)
        .bind(full_name)
        .bind(format!(
            "{}@test.com",
            full_name.replace(' ', ".").to_lowercase()
        ))
        .bind(kind)
        .bind(user_id)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test guest");

        id
    }

    /// Create a room and return its ID
    pub async fn create_test_room(&self, room_number: &str, rate: Decimal, capacity: i32) -> Uuid {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO rooms (id, room_number, room_type, rate_per_night, capacity, status, created_at, updated_at)
               VALUES ($1, $2, 'standard', $3, $4, 'available'::room_status, NOW(), NOW())"#,
        )
        .bind(id)
        .bind(room_number)
        .bind(rate)
        .bind(capacity)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test room");

        id
    }

    /// Login and return JWT access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

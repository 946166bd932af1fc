//! Application wiring: repositories, auth, services, worker, HTTP server.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::watch;

use roomhub_core::config::AppConfig;
use roomhub_core::error::AppError;
use roomhub_database::repositories::{
    BlockBookingRepository, GuestRepository, InvoiceRepository, JobRepository,
    ReservationRepository, RoomRepository, SessionRepository, UserRepository,
};
use roomhub_worker::jobs::{JobCleanupHandler, ReservationSweepHandler, SessionCleanupHandler};

use crate::router::build_router;
use crate::state::AppState;

/// Runs the RoomHub server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting RoomHub server...");

    // ── Step 1: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(db_pool.clone()));
    let room_repo = Arc::new(RoomRepository::new(db_pool.clone()));
    let guest_repo = Arc::new(GuestRepository::new(db_pool.clone()));
    let reservation_repo = Arc::new(ReservationRepository::new(db_pool.clone()));
    let block_repo = Arc::new(BlockBookingRepository::new(db_pool.clone()));
    let invoice_repo = Arc::new(InvoiceRepository::new(db_pool.clone()));
    let job_repo = Arc::new(JobRepository::new(db_pool.clone()));

    // ── Step 2: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(roomhub_auth::password::PasswordHasher::new());
    let password_validator = Arc::new(roomhub_auth::password::PasswordValidator::new(&config.auth));
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

    // ── Step 3: Initialize services ──────────────────────────────
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

    // ── Step 4: Shutdown channel, worker, and scheduler ──────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut scheduler = None;
    let _worker_handle = if config.worker.enabled {
        let worker_id = format!("worker-{}", &uuid::Uuid::new_v4().to_string()[..8]);
        let job_queue = Arc::new(roomhub_worker::JobQueue::new(
            Arc::clone(&job_repo),
            worker_id,
        ));

        let mut job_executor = roomhub_worker::JobExecutor::new();
        job_executor.register(Arc::new(ReservationSweepHandler::new(
            Arc::clone(&reservation_repo),
            config.booking.clone(),
        )));
        job_executor.register(Arc::new(SessionCleanupHandler::new(Arc::clone(
            &session_repo,
        ))));
        job_executor.register(Arc::new(JobCleanupHandler::new(Arc::clone(&job_repo))));
        let job_executor = Arc::new(job_executor);

        let worker_runner = roomhub_worker::WorkerRunner::new(
            Arc::clone(&job_queue),
            Arc::clone(&job_executor),
            config.worker.clone(),
        );

        let cron = roomhub_worker::CronScheduler::new(Arc::clone(&job_queue), config.worker.clone())
            .await?;
        cron.register_default_tasks().await?;
        cron.start().await?;
        scheduler = Some(cron);

        let worker_cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            worker_runner.run(worker_cancel).await;
        }))
    } else {
        None
    };

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = AppState {
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

    let app = build_router(app_state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("RoomHub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(mut cron) = scheduler {
        cron.shutdown().await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
    }
}

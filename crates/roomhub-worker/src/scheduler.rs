//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use roomhub_core::config::WorkerConfig;
use roomhub_core::error::AppError;

use crate::queue::{EnqueueJob, JobQueue};

/// Cron-based scheduler that enqueues periodic background work.
pub struct CronScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Job queue for enqueuing scheduled work.
    queue: Arc<JobQueue>,
    /// Worker configuration with cron expressions.
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Creates a new cron scheduler.
    pub async fn new(queue: Arc<JobQueue>, config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            queue,
            config,
        })
    }

    /// Registers all default scheduled tasks.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_reservation_sweep().await?;
        self.register_session_cleanup().await?;
        self.register_job_cleanup().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Starts the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shuts down the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Reservation sweep, cron expression from configuration.
    async fn register_reservation_sweep(&self) -> Result<(), AppError> {
        let queue = Arc::clone(&self.queue);
        let job = CronJob::new_async(
            self.config.reservation_sweep_cron.as_str(),
            move |_uuid, _lock| {
                let queue = Arc::clone(&queue);
                Box::pin(async move {
                    tracing::debug!("Scheduling reservation sweep job");
                    let params = EnqueueJob {
                        job_type: "reservation_sweep".to_string(),
                        queue: "maintenance".to_string(),
                        payload: serde_json::json!({"task": "reservation_sweep"}),
                        max_attempts: 1,
                        scheduled_at: None,
                    };
                    if let Err(e) = queue.enqueue(params).await {
                        tracing::error!("Failed to enqueue reservation_sweep: {}", e);
                    }
                })
            },
        )
        .map_err(|e| {
            AppError::internal(format!("Failed to create reservation_sweep schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add reservation_sweep schedule: {}", e))
        })?;

        tracing::info!(
            cron = %self.config.reservation_sweep_cron,
            "Registered: reservation_sweep"
        );
        Ok(())
    }

    /// Session cleanup, cron expression from configuration.
    async fn register_session_cleanup(&self) -> Result<(), AppError> {
        let queue = Arc::clone(&self.queue);
        let job = CronJob::new_async(
            self.config.session_cleanup_cron.as_str(),
            move |_uuid, _lock| {
                let queue = Arc::clone(&queue);
                Box::pin(async move {
                    tracing::debug!("Scheduling session cleanup job");
                    let params = EnqueueJob {
                        job_type: "session_cleanup".to_string(),
                        queue: "maintenance".to_string(),
                        payload: serde_json::json!({"task": "session_cleanup"}),
                        max_attempts: 1,
                        scheduled_at: None,
                    };
                    if let Err(e) = queue.enqueue(params).await {
                        tracing::error!("Failed to enqueue session_cleanup: {}", e);
                    }
                })
            },
        )
        .map_err(|e| {
            AppError::internal(format!("Failed to create session_cleanup schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add session_cleanup schedule: {}", e))
        })?;

        tracing::info!(
            cron = %self.config.session_cleanup_cron,
            "Registered: session_cleanup"
        );
        Ok(())
    }

    /// Job table cleanup, daily at 4 AM.
    async fn register_job_cleanup(&self) -> Result<(), AppError> {
        let queue = Arc::clone(&self.queue);
        let job = CronJob::new_async("0 0 4 * * *", move |_uuid, _lock| {
            let queue = Arc::clone(&queue);
            Box::pin(async move {
                tracing::debug!("Scheduling job cleanup job");
                let params = EnqueueJob {
                    job_type: "job_cleanup".to_string(),
                    queue: "maintenance".to_string(),
                    payload: serde_json::json!({"task": "job_cleanup"}),
                    max_attempts: 1,
                    scheduled_at: None,
                };
                if let Err(e) = queue.enqueue(params).await {
                    tracing::error!("Failed to enqueue job_cleanup: {}", e);
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create job_cleanup schedule: {}", e)))?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add job_cleanup schedule: {}", e))
        })?;

        tracing::info!("Registered: job_cleanup (daily at 4AM)");
        Ok(())
    }
}

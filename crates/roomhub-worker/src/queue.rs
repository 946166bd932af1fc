//! Job queue over the database-backed jobs table.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use roomhub_core::error::AppError;
use roomhub_database::repositories::JobRepository;
use roomhub_entity::job::model::{CreateJob, Job};

/// Parameters for enqueuing a new job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueJob {
    /// Job type identifier (e.g., `"reservation_sweep"`).
    pub job_type: String,
    /// Queue name (e.g., `"default"`, `"maintenance"`).
    pub queue: String,
    /// Job payload as JSON.
    pub payload: serde_json::Value,
    /// Maximum execution attempts.
    pub max_attempts: i32,
    /// Run no earlier than this time (None = immediately).
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Queue for enqueuing and claiming background jobs.
///
/// Claims use `FOR UPDATE SKIP LOCKED`, so any number of workers can
/// poll the same queues without handing a job out twice.
#[derive(Debug, Clone)]
pub struct JobQueue {
    /// Job repository for persistence.
    repo: Arc<JobRepository>,
    /// Identifier recorded on claimed jobs.
    worker_id: String,
}

impl JobQueue {
    /// Creates a new job queue.
    pub fn new(repo: Arc<JobRepository>, worker_id: String) -> Self {
        Self { repo, worker_id }
    }

    /// Enqueues a new job.
    pub async fn enqueue(&self, params: EnqueueJob) -> Result<Job, AppError> {
        let job = self
            .repo
            .create(&CreateJob {
                job_type: params.job_type,
                queue: params.queue,
                payload: params.payload,
                max_attempts: params.max_attempts,
                scheduled_at: params.scheduled_at,
            })
            .await?;

        debug!(
            job_id = %job.id,
            job_type = %job.job_type,
            queue = %job.queue,
            "Job enqueued"
        );

        Ok(job)
    }

    /// Claims the next available job from the given queues, in order.
    pub async fn dequeue(&self, queues: &[&str]) -> Result<Option<Job>, AppError> {
        for queue in queues {
            if let Some(job) = self.repo.dequeue(queue, &self.worker_id).await? {
                debug!(
                    job_id = %job.id,
                    job_type = %job.job_type,
                    queue = %job.queue,
                    "Job claimed"
                );
                return Ok(Some(job));
            }
        }
        Ok(None)
    }

    /// Marks a job as completed.
    pub async fn complete(
        &self,
        job_id: Uuid,
        result: Option<serde_json::Value>,
    ) -> Result<(), AppError> {
        self.repo.complete(job_id, result.as_ref()).await?;
        debug!(job_id = %job_id, "Job completed");
        Ok(())
    }

    /// Records a failure. The job returns to pending while attempts
    /// remain; otherwise it lands in the failed state.
    pub async fn fail(&self, job_id: Uuid, error: &str) -> Result<(), AppError> {
        self.repo.fail(job_id, error).await?;
        debug!(job_id = %job_id, error, "Job failed");
        Ok(())
    }

    /// Marks a job as failed with no further attempts.
    pub async fn fail_permanently(&self, job_id: Uuid, error: &str) -> Result<(), AppError> {
        self.repo.fail_permanently(job_id, error).await?;
        debug!(job_id = %job_id, error, "Job failed permanently");
        Ok(())
    }

    /// The identifier this queue claims jobs under.
    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }
}

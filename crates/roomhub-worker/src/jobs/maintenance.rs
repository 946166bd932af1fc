//! Job table cleanup handler.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use tracing;

use roomhub_database::repositories::JobRepository;
use roomhub_entity::job::model::Job;

use crate::executor::{JobExecutionError, JobHandler};

/// Days a completed or failed job row is kept before deletion.
const JOB_RETENTION_DAYS: i64 = 7;

/// Deletes finished job rows older than the retention window.
#[derive(Debug)]
pub struct JobCleanupHandler {
    /// Job repository.
    job_repo: Arc<JobRepository>,
}

impl JobCleanupHandler {
    /// Creates a new job cleanup handler.
    pub fn new(job_repo: Arc<JobRepository>) -> Self {
        Self { job_repo }
    }
}

#[async_trait]
impl JobHandler for JobCleanupHandler {
    fn job_type(&self) -> &str {
        "job_cleanup"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        tracing::info!(retention_days = JOB_RETENTION_DAYS, "Running job cleanup");

        let cutoff = Utc::now() - Duration::days(JOB_RETENTION_DAYS);
        let removed = self
            .job_repo
            .cleanup_old(cutoff)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Job cleanup failed: {}", e)))?;

        tracing::info!(removed, "Job cleanup completed");

        Ok(Some(serde_json::json!({
            "task": "job_cleanup",
            "jobs_removed": removed,
            "retention_days": JOB_RETENTION_DAYS,
        })))
    }
}

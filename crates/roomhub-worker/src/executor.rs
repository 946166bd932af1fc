//! Job executor — dispatches jobs to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use roomhub_core::error::AppError;
use roomhub_entity::job::model::Job;

/// A handler for one job type.
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// The job type this handler processes.
    fn job_type(&self) -> &str;

    /// Executes the job, returning an optional JSON result.
    async fn execute(&self, job: &Job) -> Result<Option<Value>, JobExecutionError>;
}

/// Error from job execution.
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// The job can never succeed; do not retry.
    #[error("Permanent job failure: {0}")]
    Permanent(String),

    /// The failure may clear up; retry while attempts remain.
    #[error("Transient job failure: {0}")]
    Transient(String),

    /// An application error bubbled out of the handler.
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

/// Dispatches jobs to the appropriate handler by `job_type`.
#[derive(Debug, Default)]
pub struct JobExecutor {
    /// Registered handlers by job type.
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl JobExecutor {
    /// Creates an executor with no handlers registered.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers a job handler.
    pub fn register(&mut self, handler: Arc<dyn JobHandler>) {
        let job_type = handler.job_type().to_string();
        info!(job_type, "Job handler registered");
        self.handlers.insert(job_type, handler);
    }

    /// Executes a job by dispatching to the matching handler.
    pub async fn execute(&self, job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let handler = self.handlers.get(&job.job_type).ok_or_else(|| {
            JobExecutionError::Permanent(format!(
                "No handler registered for job type '{}'",
                job.job_type
            ))
        })?;

        info!(
            job_id = %job.id,
            job_type = %job.job_type,
            attempt = job.attempts,
            max_attempts = job.max_attempts,
            "Executing job"
        );

        handler.execute(job).await
    }

    /// Whether a handler is registered for the given job type.
    pub fn has_handler(&self, job_type: &str) -> bool {
        self.handlers.contains_key(job_type)
    }

    /// The registered job types.
    pub fn registered_types(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use roomhub_entity::job::model::JobStatus;
    use uuid::Uuid;

    #[derive(Debug)]
    struct EchoHandler;

    #[async_trait]
    impl JobHandler for EchoHandler {
        fn job_type(&self) -> &str {
            "echo"
        }

        async fn execute(&self, job: &Job) -> Result<Option<Value>, JobExecutionError> {
            Ok(Some(job.payload.clone()))
        }
    }

    fn job(job_type: &str) -> Job {
        Job {
            id: Uuid::new_v4(),
            job_type: job_type.to_string(),
            queue: "default".to_string(),
            status: JobStatus::Running,
            payload: serde_json::json!({"hello": "world"}),
            result: None,
            error_message: None,
            attempts: 1,
            max_attempts: 3,
            worker_id: Some("worker-test".to_string()),
            scheduled_at: Some(Utc::now()),
            started_at: Some(Utc::now()),
            completed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn dispatches_to_the_registered_handler() {
        let mut executor = JobExecutor::new();
        executor.register(Arc::new(EchoHandler));

        let result = executor.execute(&job("echo")).await.unwrap();
        assert_eq!(result, Some(serde_json::json!({"hello": "world"})));
    }

    #[tokio::test]
    async fn unknown_job_type_fails_permanently() {
        let executor = JobExecutor::new();

        let err = executor.execute(&job("nonexistent")).await.unwrap_err();
        assert!(matches!(err, JobExecutionError::Permanent(_)));
    }

    #[test]
    fn tracks_registered_types() {
        let mut executor = JobExecutor::new();
        assert!(!executor.has_handler("echo"));

        executor.register(Arc::new(EchoHandler));
        assert!(executor.has_handler("echo"));
        assert_eq!(executor.registered_types(), vec!["echo".to_string()]);
    }
}

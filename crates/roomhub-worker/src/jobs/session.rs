//! Session cleanup job handler.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use roomhub_database::repositories::SessionRepository;
use roomhub_entity::job::model::Job;

use crate::executor::{JobExecutionError, JobHandler};

/// Removes expired and revoked sessions from the sessions table.
#[derive(Debug)]
pub struct SessionCleanupHandler {
    /// Session repository.
    session_repo: Arc<SessionRepository>,
}

impl SessionCleanupHandler {
    /// Creates a new session cleanup handler.
    pub fn new(session_repo: Arc<SessionRepository>) -> Self {
        Self { session_repo }
    }
}

#[async_trait]
impl JobHandler for SessionCleanupHandler {
    fn job_type(&self) -> &str {
        "session_cleanup"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        tracing::info!("Running session cleanup");

        let removed = self
            .session_repo
            .delete_expired()
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Session cleanup failed: {}", e)))?;

        tracing::info!(removed, "Session cleanup completed");

        Ok(Some(serde_json::json!({
            "task": "session_cleanup",
            "sessions_removed": removed,
        })))
    }
}

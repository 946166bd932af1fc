//! Reservation sweep job handler.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use roomhub_core::config::BookingConfig;
use roomhub_database::repositories::ReservationRepository;
use roomhub_entity::job::model::Job;

use crate::executor::{JobExecutionError, JobHandler};

/// Cancels unconfirmed reservations whose confirmation grace period has
/// elapsed.
///
/// Block booking members are left untouched; their lifecycle is driven
/// by the parent block.
#[derive(Debug)]
pub struct ReservationSweepHandler {
    /// Reservation repository.
    reservation_repo: Arc<ReservationRepository>,
    /// Booking rules, source of the grace period.
    config: BookingConfig,
}

impl ReservationSweepHandler {
    /// Creates a new reservation sweep handler.
    pub fn new(reservation_repo: Arc<ReservationRepository>, config: BookingConfig) -> Self {
        Self {
            reservation_repo,
            config,
        }
    }
}

#[async_trait]
impl JobHandler for ReservationSweepHandler {
    fn job_type(&self) -> &str {
        "reservation_sweep"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let grace_hours = self.config.confirmation_grace_hours;
        tracing::info!(grace_hours, "Running reservation sweep");

        let canceled = self
            .reservation_repo
            .sweep_unconfirmed(grace_hours)
            .await
            .map_err(|e| {
                JobExecutionError::Transient(format!("Reservation sweep failed: {}", e))
            })?;

        tracing::info!(canceled, "Reservation sweep completed");

        Ok(Some(serde_json::json!({
            "task": "reservation_sweep",
            "grace_hours": grace_hours,
            "reservations_canceled": canceled,
        })))
    }
}

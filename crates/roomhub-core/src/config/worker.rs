//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background job worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of concurrent job processing tasks.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Interval in seconds between job queue polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Cron expression for the nightly unconfirmed-reservation sweep.
    #[serde(default = "default_sweep_cron")]
    pub reservation_sweep_cron: String,
    /// Cron expression for expired-session cleanup.
    #[serde(default = "default_session_cleanup_cron")]
    pub session_cleanup_cron: String,
    /// Shared secret required by the internal sweep trigger endpoint.
    #[serde(default = "default_sweep_secret")]
    pub sweep_secret: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            concurrency: default_concurrency(),
            poll_interval_seconds: default_poll_interval(),
            reservation_sweep_cron: default_sweep_cron(),
            session_cleanup_cron: default_session_cleanup_cron(),
            sweep_secret: default_sweep_secret(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    4
}

fn default_poll_interval() -> u64 {
    5
}

fn default_sweep_cron() -> String {
    // Every day at 03:00 UTC.
    "0 0 3 * * *".to_string()
}

fn default_session_cleanup_cron() -> String {
    // Top of every hour.
    "0 0 * * * *".to_string()
}

fn default_sweep_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

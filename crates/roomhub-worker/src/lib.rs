//! # roomhub-worker
//!
//! Background job processing and scheduled tasks for RoomHub.
//!
//! This crate provides:
//! - A worker runner that polls for and executes queued jobs
//! - A cron scheduler that enqueues periodic maintenance work
//! - A job executor that dispatches jobs to the correct handler
//! - Built-in handlers for the reservation sweep and cleanup tasks

pub mod executor;
pub mod jobs;
pub mod queue;
pub mod runner;
pub mod scheduler;

pub use executor::{JobExecutor, JobHandler};
pub use queue::JobQueue;
pub use runner::WorkerRunner;
pub use scheduler::CronScheduler;

//! Herald Jobs - a tokio-backed job system for Herald.
//!
//! [`ChannelJobQueue`] implements [`herald_core::jobs::JobQueue`] by sending
//! each enqueued job over an unbounded channel. [`JobWorker`] drains that
//! channel and runs the [`PerformJob`] registered for each job class.

mod channel_queue;
mod performers;
mod worker;

pub use channel_queue::ChannelJobQueue;
pub use performers::{FnPerformer, PerformJob, PublishJobPerformer};
pub use worker::{JobOutcome, JobWorker, WorkerStats};

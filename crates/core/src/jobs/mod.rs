//! Jobs module - job capabilities, the job catalog, and the provided jobs.
//!
//! The job system itself is an external collaborator reached through
//! [`JobQueue`]. Jobs are registered in a [`JobCatalog`] by name and
//! advertise what they can do through [`Job`]'s capability accessors.

mod job_catalog;
mod jobs_model;
mod jobs_traits;
mod queued_jobs;
mod recording_queue;

// Re-export the public interface
pub use job_catalog::JobCatalog;
pub use jobs_model::{EnqueuedJob, JobId, JobRef};
pub use jobs_traits::{Job, JobQueue, PerformLater, PublishJob};
pub use queued_jobs::{DispatchJob, QueuedJob};
pub use recording_queue::RecordingJobQueue;

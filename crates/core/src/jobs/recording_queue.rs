//! In-memory job queue that records what would have been scheduled.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use super::{EnqueuedJob, JobId, JobQueue};
use crate::errors::{Error, Result};

/// Job queue for tests - collects enqueued jobs instead of running them.
#[derive(Clone, Debug, Default)]
pub struct RecordingJobQueue {
    jobs: Arc<Mutex<Vec<EnqueuedJob>>>,
    rejecting: bool,
}

impl RecordingJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue that refuses every enqueue, for exercising failure paths.
    pub fn rejecting() -> Self {
        Self {
            rejecting: true,
            ..Self::default()
        }
    }

    /// Returns all enqueued jobs, oldest first.
    pub fn jobs(&self) -> Vec<EnqueuedJob> {
        self.lock().clone()
    }

    /// Returns the jobs enqueued under the given job class.
    pub fn jobs_for(&self, job_class: &str) -> Vec<EnqueuedJob> {
        self.lock()
            .iter()
            .filter(|job| job.job_class == job_class)
            .cloned()
            .collect()
    }

    /// Clears enqueued jobs.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<EnqueuedJob>> {
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JobQueue for RecordingJobQueue {
    fn enqueue(&self, job_class: &str, payload: Value) -> Result<JobId> {
        if self.rejecting {
            return Err(Error::Enqueue {
                job: job_class.to_string(),
                message: "queue is not accepting jobs".to_string(),
            });
        }

        let job = EnqueuedJob::new(job_class, payload);
        let id = job.id.clone();
        self.lock().push(job);
        Ok(id)
    }
}

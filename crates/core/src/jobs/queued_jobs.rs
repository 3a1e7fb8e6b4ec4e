//! Jobs backed by a [`JobQueue`].

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{Job, JobId, JobQueue, PerformLater, PublishJob};
use crate::errors::Result;
use crate::subscriptions::Subscriptions;

/// A job that is performed later by enqueuing it under its name.
///
/// This is the usual subscription job: the job system looks the name up on
/// its side and runs whatever it has registered for it.
#[derive(Clone)]
pub struct QueuedJob {
    name: String,
    queue: Arc<dyn JobQueue>,
}

impl QueuedJob {
    pub fn new(name: impl Into<String>, queue: Arc<dyn JobQueue>) -> Self {
        Self {
            name: name.into(),
            queue,
        }
    }
}

impl Job for QueuedJob {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_perform_later(&self) -> Option<&dyn PerformLater> {
        Some(self)
    }
}

impl PerformLater for QueuedJob {
    fn perform_later(&self, params: Value) -> Result<JobId> {
        self.queue.enqueue(&self.name, params)
    }
}

impl fmt::Debug for QueuedJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedJob").field("name", &self.name).finish()
    }
}

/// The provided publish job.
///
/// Enqueued by the job publisher with a publish payload; when performed it
/// dispatches that payload to the subscriptions registry it was built with.
pub struct DispatchJob {
    job: QueuedJob,
    subscriptions: Arc<Subscriptions>,
}

impl DispatchJob {
    pub fn new(
        name: impl Into<String>,
        queue: Arc<dyn JobQueue>,
        subscriptions: Arc<Subscriptions>,
    ) -> Self {
        Self {
            job: QueuedJob::new(name, queue),
            subscriptions,
        }
    }
}

impl Job for DispatchJob {
    fn name(&self) -> &str {
        self.job.name()
    }

    fn as_perform_later(&self) -> Option<&dyn PerformLater> {
        Some(&self.job)
    }

    fn as_publish_job(&self) -> Option<&dyn PublishJob> {
        Some(self)
    }
}

impl PublishJob for DispatchJob {
    fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }
}

impl fmt::Debug for DispatchJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchJob")
            .field("name", &self.job.name)
            .finish()
    }
}

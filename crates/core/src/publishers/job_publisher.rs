//! Publisher that re-delivers publications through the publish job.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use log::warn;

use super::{Publication, Publisher};
use crate::errors::{Error, Result};
use crate::events::{Event, EventParams};
use crate::jobs::{Job, JobId, PerformLater};

/// A publication whose publish job is enqueued at most once.
///
/// Running it again, for instance from a retried caller holding the same
/// publication, returns the same event without scheduling another job.
/// Only a successful enqueue is kept, so a refused one is tried again.
#[derive(Debug)]
pub struct JobPublication {
    publication: Publication,
    published_job: Mutex<Option<JobId>>,
}

impl JobPublication {
    pub fn new(event_name: impl Into<String>, event_params: EventParams) -> Self {
        Self {
            publication: Publication::new(event_name, event_params),
            published_job: Mutex::new(None),
        }
    }

    pub fn publication(&self) -> &Publication {
        &self.publication
    }

    /// Id of the scheduled publish job, once one was enqueued.
    pub fn published_job_id(&self) -> Option<JobId> {
        self.published_job().clone()
    }

    /// Enqueues the publish payload unless an earlier call already did, and
    /// returns the event.
    ///
    /// A refused enqueue is logged; the next call tries again.
    pub fn call(&self, publish_job: &dyn PerformLater) -> &Event {
        let mut published_job = self.published_job();
        if published_job.is_none() {
            let payload = self.publication.publish_payload().into_value();
            match publish_job.perform_later(payload) {
                Ok(job_id) => *published_job = Some(job_id),
                Err(e) => warn!(
                    "Failed to enqueue publish job for {:?} ({}): {}",
                    self.publication.event_name(),
                    self.publication.event_id(),
                    e
                ),
            }
        }

        self.publication.event()
    }

    fn published_job(&self) -> MutexGuard<'_, Option<JobId>> {
        self.published_job
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Publishes by enqueuing each publication on the configured publish job.
#[derive(Clone)]
pub struct JobPublisher {
    publish_job: Arc<dyn Job>,
}

impl JobPublisher {
    /// Fails with [`Error::InvalidHandler`] when the publish job cannot be
    /// enqueued.
    pub fn new(publish_job: Arc<dyn Job>) -> Result<Self> {
        if publish_job.as_perform_later().is_none() {
            return Err(Error::InvalidHandler(publish_job.name().to_string()));
        }
        Ok(Self { publish_job })
    }

    pub fn publish_job(&self) -> &Arc<dyn Job> {
        &self.publish_job
    }
}

impl Publisher for JobPublisher {
    fn call(&self, event_name: &str, event_params: EventParams) -> Event {
        let publication = JobPublication::new(event_name, event_params);
        // Checked in `new`.
        if let Some(perform_later) = self.publish_job.as_perform_later() {
            publication.call(perform_later);
        }
        publication.publication.into_event()
    }
}

impl fmt::Debug for JobPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobPublisher")
            .field("publish_job", &self.publish_job.name())
            .finish()
    }
}

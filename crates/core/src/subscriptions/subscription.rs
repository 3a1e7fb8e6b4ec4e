use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{Error, Result};
use crate::events::EventParams;
use crate::jobs::{Job, JobId};

/// Binds an event name to a job that can be performed later.
///
/// Equality and hashing only consider the job's identity: the same job is
/// never registered twice for one event, whichever name it was added under.
#[derive(Clone)]
pub struct Subscription {
    event_name: String,
    job: Arc<dyn Job>,
}

impl Subscription {
    /// Fails with [`Error::InvalidHandler`] when the job cannot be invoked
    /// asynchronously.
    pub fn new(event_name: impl Into<String>, job: Arc<dyn Job>) -> Result<Self> {
        if job.as_perform_later().is_none() {
            return Err(Error::InvalidHandler(job.name().to_string()));
        }

        Ok(Self {
            event_name: event_name.into(),
            job,
        })
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn job(&self) -> &Arc<dyn Job> {
        &self.job
    }

    pub fn job_name(&self) -> &str {
        self.job.name()
    }

    /// Schedules the job with the event params.
    pub fn call(&self, params: &EventParams) -> Result<JobId> {
        let perform_later = self
            .job
            .as_perform_later()
            .ok_or_else(|| Error::InvalidHandler(self.job_name().to_string()))?;

        perform_later.perform_later(Value::Object(params.clone()))
    }
}

impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        self.job_name() == other.job_name()
    }
}

impl Eq for Subscription {}

impl Hash for Subscription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.job_name().hash(state);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event_name", &self.event_name)
            .field("job", &self.job_name())
            .finish()
    }
}

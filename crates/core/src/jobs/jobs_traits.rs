//! Traits describing the job system and job capabilities.

use serde_json::Value;

use super::JobId;
use crate::errors::Result;
use crate::events::PublishPayload;
use crate::subscriptions::{DispatchSummary, Subscriptions};

/// The external job system.
///
/// `enqueue` schedules `job_class` to be performed with `payload` at some
/// later point, possibly on another worker. It must not block on the job
/// itself.
pub trait JobQueue: Send + Sync {
    fn enqueue(&self, job_class: &str, payload: Value) -> Result<JobId>;
}

/// A job known to the catalog.
///
/// Capabilities are discovered through the `as_*` accessors, which default
/// to `None`. A job opts into a capability by overriding the accessor.
pub trait Job: Send + Sync {
    /// Identity of the job. Two handles with the same name are the same job.
    fn name(&self) -> &str;

    /// Asynchronous-invoke capability.
    fn as_perform_later(&self) -> Option<&dyn PerformLater> {
        None
    }

    /// Declared conformance to the publish job contract.
    fn as_publish_job(&self) -> Option<&dyn PublishJob> {
        None
    }
}

/// Asynchronous-invoke capability: schedule the job with the given params.
pub trait PerformLater: Send + Sync {
    fn perform_later(&self, params: Value) -> Result<JobId>;
}

/// Contract for the job that re-delivers published events.
///
/// When the job system performs the publish job, the payload is handed to
/// the subscriptions registry, which fans the event params out to every
/// subscribed job.
pub trait PublishJob: Send + Sync {
    fn subscriptions(&self) -> &Subscriptions;

    fn perform(&self, payload: Value) -> Result<DispatchSummary> {
        let payload = PublishPayload::from_value(payload)?;
        Ok(self.subscriptions().dispatch(&payload))
    }
}

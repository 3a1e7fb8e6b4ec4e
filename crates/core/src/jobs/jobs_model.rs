use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::Job;

/// Identifier the job system hands back for a scheduled job.
pub type JobId = String;

/// A unit of work handed to the job system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnqueuedJob {
    pub id: JobId,
    pub job_class: String,
    pub payload: Value,
    pub enqueued_at: DateTime<Utc>,
}

impl EnqueuedJob {
    pub fn new(job_class: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            job_class: job_class.into(),
            payload,
            enqueued_at: Utc::now(),
        }
    }
}

/// Reference to a job as supplied by the host: a catalog name or a job
/// handle. Handles are still resolved through the catalog by name.
#[derive(Clone)]
pub enum JobRef {
    Name(String),
    Job(Arc<dyn Job>),
}

impl JobRef {
    pub fn name(&self) -> &str {
        match self {
            JobRef::Name(name) => name,
            JobRef::Job(job) => job.name(),
        }
    }
}

impl fmt::Debug for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobRef::Name(name) => f.debug_tuple("Name").field(name).finish(),
            JobRef::Job(job) => f.debug_tuple("Job").field(&job.name()).finish(),
        }
    }
}

impl From<&str> for JobRef {
    fn from(name: &str) -> Self {
        JobRef::Name(name.to_string())
    }
}

impl From<String> for JobRef {
    fn from(name: String) -> Self {
        JobRef::Name(name)
    }
}

impl From<Arc<dyn Job>> for JobRef {
    fn from(job: Arc<dyn Job>) -> Self {
        JobRef::Job(job)
    }
}

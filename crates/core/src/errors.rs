//! Core error types for herald.
//!
//! Every variant except `Enqueue` is raised at configuration or
//! registration time. Publishing and dispatching never fail on a missing
//! subscriber or on a downstream job failure.

use std::fmt;

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Which role a job reference is being resolved for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// The job that re-delivers published events.
    Publish,
    /// A job that receives the params of a subscribed event.
    Subscription,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Publish => "publish",
            JobKind::Subscription => "subscription",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root error type for the pub/sub core.
#[derive(Error, Debug)]
pub enum Error {
    /// A job reference does not resolve to any job in the catalog.
    #[error("Unknown {kind} job class: {name}.")]
    UnknownJob { kind: JobKind, name: String },

    /// The publish job does not declare the `PublishJob` contract.
    #[error(
        "Publish job classes must implement PublishJob. The given job class, {0}, does not."
    )]
    ContractViolation(String),

    /// The job cannot be invoked asynchronously.
    #[error("Invalid job class {0}: it does not respond to perform_later.")]
    InvalidHandler(String),

    /// The job system refused to schedule a job.
    #[error("Failed to enqueue {job} job: {message}")]
    Enqueue { job: String, message: String },

    /// The publish job was handed something that is not a publish payload.
    #[error("Invalid publish payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

impl Error {
    /// Builds an `UnknownJob` error, rendering an unset reference as `nil`.
    pub fn unknown_job(kind: JobKind, name: Option<&str>) -> Self {
        Error::UnknownJob {
            kind,
            name: match name {
                Some(name) => format!("{name:?}"),
                None => "nil".to_string(),
            },
        }
    }
}

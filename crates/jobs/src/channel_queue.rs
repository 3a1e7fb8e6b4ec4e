//! Job queue backed by a tokio channel.

use serde_json::Value;
use tokio::sync::mpsc;

use herald_core::errors::{Error, Result};
use herald_core::jobs::{EnqueuedJob, JobId, JobQueue};

/// Job queue that hands jobs to a [`JobWorker`](crate::JobWorker) over an
/// unbounded channel.
///
/// Enqueue never blocks. Jobs sent before the worker starts are buffered
/// and picked up once it runs.
#[derive(Clone, Debug)]
pub struct ChannelJobQueue {
    tx: mpsc::UnboundedSender<EnqueuedJob>,
}

impl ChannelJobQueue {
    /// Creates the queue and the receiver the worker drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EnqueuedJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl JobQueue for ChannelJobQueue {
    fn enqueue(&self, job_class: &str, payload: Value) -> Result<JobId> {
        let job = EnqueuedJob::new(job_class, payload);
        let id = job.id.clone();

        self.tx.send(job).map_err(|_| Error::Enqueue {
            job: job_class.to_string(),
            message: "job worker has shut down".to_string(),
        })?;

        Ok(id)
    }
}

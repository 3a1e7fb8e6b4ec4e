//! Job worker for processing enqueued jobs.
//!
//! Receives jobs from the channel queue and performs each one on its own
//! tokio task. Job failures are logged and counted; they never stop the
//! worker. There are no retries.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use herald_core::jobs::EnqueuedJob;

use crate::performers::PerformJob;

/// How a single job ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    Performed,
    Failed,
    /// No performer registered for the job class.
    Unknown,
}

/// Counts of job outcomes over a worker run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub performed: usize,
    pub failed: usize,
    pub unknown: usize,
}

impl WorkerStats {
    pub fn total(&self) -> usize {
        self.performed + self.failed + self.unknown
    }

    fn record(&mut self, outcome: JobOutcome) {
        match outcome {
            JobOutcome::Performed => self.performed += 1,
            JobOutcome::Failed => self.failed += 1,
            JobOutcome::Unknown => self.unknown += 1,
        }
    }
}

/// Maps job classes to performers and runs enqueued jobs.
#[derive(Clone, Default)]
pub struct JobWorker {
    performers: HashMap<String, Arc<dyn PerformJob>>,
}

impl JobWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the performer for a job class, replacing any earlier one.
    pub fn register(
        &mut self,
        job_class: impl Into<String>,
        performer: Arc<dyn PerformJob>,
    ) -> &mut Self {
        self.performers.insert(job_class.into(), performer);
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with_performer(
        mut self,
        job_class: impl Into<String>,
        performer: Arc<dyn PerformJob>,
    ) -> Self {
        self.register(job_class, performer);
        self
    }

    /// Performs one job inline.
    pub async fn perform(&self, job: EnqueuedJob) -> JobOutcome {
        let performer = self.performers.get(&job.job_class).cloned();
        perform_job(performer, job).await
    }

    /// Runs jobs until the channel closes or `shutdown` resolves, then waits
    /// for jobs already in flight.
    pub async fn run<S>(
        &self,
        mut rx: mpsc::UnboundedReceiver<EnqueuedJob>,
        shutdown: S,
    ) -> WorkerStats
    where
        S: Future<Output = ()>,
    {
        info!("Job worker started");

        let mut stats = WorkerStats::default();
        let mut in_flight = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                job = rx.recv() => {
                    match job {
                        Some(job) => self.spawn(&mut in_flight, job),
                        None => break,
                    }
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    stats.record(joined_outcome(joined));
                }
                _ = &mut shutdown => {
                    debug!("Job worker received shutdown signal");
                    break;
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            stats.record(joined_outcome(joined));
        }

        info!(
            "Job worker shutting down: {} performed, {} failed, {} unknown",
            stats.performed, stats.failed, stats.unknown
        );
        stats
    }

    /// Runs jobs until the queue is empty and nothing is in flight.
    ///
    /// Jobs enqueued by running jobs are picked up too, so a publication and
    /// the subscription jobs it fans out to all complete before this returns.
    pub async fn run_until_idle(
        &self,
        rx: &mut mpsc::UnboundedReceiver<EnqueuedJob>,
    ) -> WorkerStats {
        let mut stats = WorkerStats::default();
        let mut in_flight = JoinSet::new();

        loop {
            while let Ok(job) = rx.try_recv() {
                self.spawn(&mut in_flight, job);
            }

            match in_flight.join_next().await {
                Some(joined) => stats.record(joined_outcome(joined)),
                None => break,
            }
        }

        debug!("Job worker idle after {} job(s)", stats.total());
        stats
    }

    fn spawn(&self, in_flight: &mut JoinSet<JobOutcome>, job: EnqueuedJob) {
        let performer = self.performers.get(&job.job_class).cloned();
        in_flight.spawn(perform_job(performer, job));
    }
}

impl fmt::Debug for JobWorker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut job_classes: Vec<&str> = self.performers.keys().map(String::as_str).collect();
        job_classes.sort_unstable();
        f.debug_struct("JobWorker")
            .field("job_classes", &job_classes)
            .finish()
    }
}

async fn perform_job(performer: Option<Arc<dyn PerformJob>>, job: EnqueuedJob) -> JobOutcome {
    let Some(performer) = performer else {
        warn!("No performer registered for job class {} ({})", job.job_class, job.id);
        return JobOutcome::Unknown;
    };

    let waited = Utc::now() - job.enqueued_at;
    debug!(
        "Performing {} ({}) after {}ms in queue",
        job.job_class,
        job.id,
        waited.num_milliseconds()
    );

    match performer.perform(job.payload).await {
        Ok(()) => JobOutcome::Performed,
        Err(e) => {
            warn!("Job {} ({}) failed: {:#}", job.job_class, job.id, e);
            JobOutcome::Failed
        }
    }
}

fn joined_outcome(joined: Result<JobOutcome, tokio::task::JoinError>) -> JobOutcome {
    joined.unwrap_or_else(|e| {
        warn!("Job task aborted: {}", e);
        JobOutcome::Failed
    })
}

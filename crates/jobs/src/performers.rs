//! Job performers: what the worker runs for a job class.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use herald_core::jobs::PublishJob;

/// Runs a job with the payload it was enqueued with.
#[async_trait]
pub trait PerformJob: Send + Sync {
    async fn perform(&self, payload: Value) -> anyhow::Result<()>;
}

/// Performs the publish job: dispatches the payload to its subscriptions.
pub struct PublishJobPerformer {
    job: Arc<dyn PublishJob>,
}

impl PublishJobPerformer {
    pub fn new(job: Arc<dyn PublishJob>) -> Self {
        Self { job }
    }
}

#[async_trait]
impl PerformJob for PublishJobPerformer {
    async fn perform(&self, payload: Value) -> anyhow::Result<()> {
        self.job.perform(payload)?;
        Ok(())
    }
}

/// Performs a job with an async closure.
pub struct FnPerformer<F> {
    f: F,
}

impl<F, Fut> FnPerformer<F>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }

    pub fn arc(f: F) -> Arc<dyn PerformJob> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> PerformJob for FnPerformer<F>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn perform(&self, payload: Value) -> anyhow::Result<()> {
        (self.f)(payload).await
    }
}

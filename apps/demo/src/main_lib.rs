use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use herald_core::jobs::{DispatchJob, EnqueuedJob, JobCatalog, JobQueue, QueuedJob};
use herald_core::subscriptions::Subscriptions;
use herald_core::PubSub;
use herald_jobs::{ChannelJobQueue, FnPerformer, JobWorker, PerformJob, PublishJobPerformer};

use crate::config::{Config, DEFAULT_PUBLISH_JOB};

/// Subscription jobs the demo registers, by catalog name.
const SUBSCRIPTION_JOBS: [&str; 3] = ["WelcomeEmailJob", "AuditLogJob", "InvoiceJob"];

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub struct App {
    pub pubsub: PubSub,
    pub worker: JobWorker,
    pub jobs: mpsc::UnboundedReceiver<EnqueuedJob>,
}

pub fn build_app(config: &Config) -> anyhow::Result<App> {
    let (queue, jobs) = ChannelJobQueue::new();
    let queue: Arc<dyn JobQueue> = Arc::new(queue);
    let subscriptions = Arc::new(Subscriptions::new());

    let publish_job_name = config
        .pubsub
        .publish_job
        .clone()
        .unwrap_or_else(|| DEFAULT_PUBLISH_JOB.to_string());
    let publish_job = Arc::new(DispatchJob::new(
        publish_job_name.clone(),
        queue.clone(),
        subscriptions.clone(),
    ));

    let mut catalog = JobCatalog::new();
    catalog.register(publish_job.clone());
    let mut worker = JobWorker::new();
    worker.register(publish_job_name, Arc::new(PublishJobPerformer::new(publish_job)));
    for name in SUBSCRIPTION_JOBS {
        catalog.register(Arc::new(QueuedJob::new(name, queue.clone())));
        worker.register(name, logging_performer(name));
    }

    let pubsub = PubSub::new(config.pubsub.clone(), catalog, subscriptions)?;
    pubsub.load_subscriptions(register_subscriptions)?;

    Ok(App {
        pubsub,
        worker,
        jobs,
    })
}

/// The registration pass: every subscription the demo wires up.
pub fn register_subscriptions(pubsub: &PubSub) -> herald_core::Result<()> {
    pubsub.subscribe("user_signed_up", "WelcomeEmailJob")?;
    pubsub.subscribe("user_signed_up", "AuditLogJob")?;
    pubsub.subscribe("order_placed", "AuditLogJob")?;
    pubsub.subscribe("Order_Placed", "InvoiceJob")?;
    Ok(())
}

fn logging_performer(name: &'static str) -> Arc<dyn PerformJob> {
    FnPerformer::arc(move |params: Value| async move {
        tracing::info!("{} performed with {}", name, params);
        anyhow::Ok(())
    })
}

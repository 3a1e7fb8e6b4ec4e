//! The pub/sub façade.

use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::config::{PubSubConfig, PublishedEventsKind, PublisherKind};
use crate::errors::{Error, JobKind, Result};
use crate::events::{DiscardingEventSink, Event, EventParams, EventSink, RetainingEventSink};
use crate::jobs::{Job, JobCatalog, JobRef};
use crate::publishers::{JobPublisher, Publisher, TestPublisher};
use crate::subscriptions::{Subscription, Subscriptions};

/// Entry point for publishing events and registering subscriptions.
///
/// Built once at startup from a [`PubSubConfig`], the job catalog, and the
/// subscriptions registry the publish job dispatches to. Configuration
/// errors surface here, before anything is published.
pub struct PubSub {
    config: PubSubConfig,
    catalog: JobCatalog,
    subscriptions: Arc<Subscriptions>,
    publisher: Arc<dyn Publisher>,
    published_events: Arc<dyn EventSink>,
}

impl PubSub {
    pub fn new(
        config: PubSubConfig,
        catalog: JobCatalog,
        subscriptions: Arc<Subscriptions>,
    ) -> Result<Self> {
        let publisher: Arc<dyn Publisher> = match config.publisher {
            PublisherKind::Job => {
                let publish_job = catalog.resolve_publish_job(config.publish_job.as_deref())?;
                ensure_shared_registry(publish_job.as_ref(), &subscriptions)?;
                Arc::new(JobPublisher::new(publish_job)?)
            }
            PublisherKind::Test => Arc::new(TestPublisher),
        };
        let published_events: Arc<dyn EventSink> = match config.published_events {
            PublishedEventsKind::Discarding => Arc::new(DiscardingEventSink),
            PublishedEventsKind::Retaining => Arc::new(RetainingEventSink::new()),
        };

        debug!(
            "Pub/sub configured: publisher={:?}, published_events={:?}, publish_job={:?}",
            config.publisher, config.published_events, config.publish_job
        );

        Ok(Self {
            config,
            catalog,
            subscriptions,
            publisher,
            published_events,
        })
    }

    /// Publishes an event and returns it as a receipt.
    pub fn publish(&self, event_name: &str, event_params: EventParams) -> Event {
        let event = self.publisher.call(event_name, event_params);
        self.published_events.record(&event);

        info!(
            "Published {:?}:\n  ID: {}\n  PARAMS: {:?}",
            event.name(),
            event.id(),
            event.params()
        );

        event
    }

    /// Subscribes a catalog job to an event name.
    ///
    /// On error the registry is left untouched.
    pub fn subscribe(&self, event_name: &str, job: impl Into<JobRef>) -> Result<()> {
        let job = self
            .catalog
            .resolve_job(&job.into(), JobKind::Subscription)?;
        self.subscriptions.add(Subscription::new(event_name, job)?);
        Ok(())
    }

    /// Runs the host's registration pass.
    ///
    /// The publish job is resolved first so a misconfigured publish job fails
    /// before any subscription is registered.
    pub fn load_subscriptions<F>(&self, register: F) -> Result<()>
    where
        F: FnOnce(&PubSub) -> Result<()>,
    {
        self.resolve_publish_job()?;
        register(self)?;

        info!(
            "Loaded {} subscription(s) for {} event(s)",
            self.subscriptions.len(),
            self.subscriptions.event_names().len()
        );
        Ok(())
    }

    /// Switches to test publishing: events are built but not enqueued, and
    /// every published event is retained.
    pub fn setup_test_publishing(&mut self) {
        self.config.publisher = PublisherKind::Test;
        self.config.published_events = PublishedEventsKind::Retaining;
        self.publisher = Arc::new(TestPublisher);
        self.published_events = Arc::new(RetainingEventSink::new());
    }

    /// Resolves the configured publish job.
    ///
    /// The job must dispatch to the same registry this façade subscribes to.
    pub fn resolve_publish_job(&self) -> Result<Arc<dyn Job>> {
        let publish_job = self
            .catalog
            .resolve_publish_job(self.config.publish_job.as_deref())?;
        ensure_shared_registry(publish_job.as_ref(), &self.subscriptions)?;
        Ok(publish_job)
    }

    /// Events retained by the configured sink, oldest first.
    pub fn published_events(&self) -> Vec<Event> {
        self.published_events.all()
    }

    pub fn event_sink(&self) -> &Arc<dyn EventSink> {
        &self.published_events
    }

    pub fn subscriptions(&self) -> &Arc<Subscriptions> {
        &self.subscriptions
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &PubSubConfig {
        &self.config
    }
}

fn ensure_shared_registry(publish_job: &dyn Job, subscriptions: &Subscriptions) -> Result<()> {
    match publish_job.as_publish_job() {
        Some(job) if !std::ptr::eq(job.subscriptions(), subscriptions) => {
            Err(Error::InvalidConfigValue(format!(
                "publish job {} dispatches to a different subscriptions registry",
                publish_job.name()
            )))
        }
        _ => Ok(()),
    }
}

impl fmt::Debug for PubSub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PubSub")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

//! Pub/sub configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{PUBLISHED_EVENTS_ENV, PUBLISHER_ENV, PUBLISH_JOB_ENV};
use crate::errors::{Error, Result};

/// Which publisher strategy the façade uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublisherKind {
    /// Enqueue every publication on the publish job.
    #[default]
    Job,
    /// Build events only.
    Test,
}

impl FromStr for PublisherKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "job" => Ok(PublisherKind::Job),
            "test" => Ok(PublisherKind::Test),
            other => Err(Error::InvalidConfigValue(format!(
                "{PUBLISHER_ENV}={other} (expected job or test)"
            ))),
        }
    }
}

/// Which sink records published events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishedEventsKind {
    #[default]
    Discarding,
    Retaining,
}

impl FromStr for PublishedEventsKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "discarding" => Ok(PublishedEventsKind::Discarding),
            "retaining" => Ok(PublishedEventsKind::Retaining),
            other => Err(Error::InvalidConfigValue(format!(
                "{PUBLISHED_EVENTS_ENV}={other} (expected discarding or retaining)"
            ))),
        }
    }
}

/// Configuration read once at startup and handed to [`PubSub`](crate::PubSub).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PubSubConfig {
    /// Catalog name of the publish job.
    pub publish_job: Option<String>,
    pub publisher: PublisherKind,
    pub published_events: PublishedEventsKind,
}

impl PubSubConfig {
    /// Configuration publishing through the named publish job.
    pub fn new(publish_job: impl Into<String>) -> Self {
        Self {
            publish_job: Some(publish_job.into()),
            ..Self::default()
        }
    }

    /// Configuration for tests: nothing is enqueued, published events are kept.
    pub fn testing() -> Self {
        Self {
            publish_job: None,
            publisher: PublisherKind::Test,
            published_events: PublishedEventsKind::Retaining,
        }
    }

    /// Reads the configuration from `HERALD_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let publish_job = lookup(PUBLISH_JOB_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let publisher = match lookup(PUBLISHER_ENV) {
            Some(value) => value.parse()?,
            None => PublisherKind::default(),
        };
        let published_events = match lookup(PUBLISHED_EVENTS_ENV) {
            Some(value) => value.parse()?,
            None => PublishedEventsKind::default(),
        };

        Ok(Self {
            publish_job,
            publisher,
            published_events,
        })
    }
}

//! Herald Core - in-process publish/subscribe.
//!
//! Callers publish named events with arbitrary params. Subscribers are jobs
//! that receive those params once the publish job re-delivers the event.
//! The job system that runs jobs is external and reached through
//! [`jobs::JobQueue`].
//!
//! # Architecture
//!
//! ```text
//! PubSub::publish(name, params)
//!        |
//!        v
//! +------------------+     +------------------+
//! |    Publisher     | --> |    EventSink     |  (discarding / retaining)
//! +------------------+     +------------------+
//!        |  perform_later({event_id, event_name, event_params})
//!        v
//! +------------------+
//! |  job system      |  (external)
//! +------------------+
//!        |  PublishJob::perform(payload)
//!        v
//! +------------------+
//! |  Subscriptions   |  dispatch: one perform_later per subscribed job
//! +------------------+
//! ```

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod jobs;
pub mod publishers;
pub mod subscriptions;

mod pubsub;


pub use config::{PubSubConfig, PublishedEventsKind, PublisherKind};
pub use events::{Event, EventParams, PublishPayload};
pub use pubsub::PubSub;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

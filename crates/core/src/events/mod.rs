//! Events module.
//!
//! Provides the published event value, the payload handed to the publish
//! job, and the sinks that optionally retain published events for tests.

mod events_model;
mod sink;

pub use events_model::*;
pub use sink::*;

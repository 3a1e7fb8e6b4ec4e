//! Published event sink trait and implementations.

use std::sync::{Arc, Mutex, MutexGuard};

use super::Event;

/// Trait for recording published events.
///
/// The façade records every event it publishes through this trait. The
/// default sink discards them; the retaining sink keeps them so tests can
/// inspect what was published.
pub trait EventSink: Send + Sync {
    /// Record a single published event.
    fn record(&self, event: &Event);

    /// All retained events, oldest first.
    fn all(&self) -> Vec<Event>;

    /// The most recently retained event.
    fn last(&self) -> Option<Event> {
        self.all().pop()
    }

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Default sink: published events are not kept.
#[derive(Clone, Debug, Default)]
pub struct DiscardingEventSink;

impl EventSink for DiscardingEventSink {
    fn record(&self, _event: &Event) {
        // Intentionally empty - events are discarded
    }

    fn all(&self) -> Vec<Event> {
        Vec::new()
    }
}

/// Testing sink - appends every published event.
#[derive(Clone, Debug, Default)]
pub struct RetainingEventSink {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RetainingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears retained events.
    pub fn clear(&self) {
        self.events().clear();
    }

    fn events(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for RetainingEventSink {
    fn record(&self, event: &Event) {
        self.events().push(event.clone());
    }

    fn all(&self) -> Vec<Event> {
        self.events().clone()
    }

    fn last(&self) -> Option<Event> {
        self.events().last().cloned()
    }

    fn len(&self) -> usize {
        self.events().len()
    }
}

use crate::events::{Event, EventParams};

/// Strategy used by the façade to publish an event.
pub trait Publisher: Send + Sync {
    /// Builds the event for this publication, scheduling whatever delivery
    /// the strategy performs. Never fails.
    fn call(&self, event_name: &str, event_params: EventParams) -> Event;
}

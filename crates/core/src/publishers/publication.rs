use uuid::Uuid;

use crate::events::{Event, EventParams, PublishPayload};

/// A single publish call: the event it produced and the payload that
/// re-delivers it.
#[derive(Clone, Debug, PartialEq)]
pub struct Publication {
    event: Event,
}

impl Publication {
    pub fn new(event_name: impl Into<String>, event_params: EventParams) -> Self {
        Self {
            event: Event::new(event_name, event_params),
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn into_event(self) -> Event {
        self.event
    }

    pub fn event_id(&self) -> Uuid {
        self.event.id()
    }

    pub fn event_name(&self) -> &str {
        self.event.name()
    }

    pub fn event_params(&self) -> &EventParams {
        self.event.params()
    }

    pub fn publish_payload(&self) -> PublishPayload {
        self.event.publish_payload()
    }
}

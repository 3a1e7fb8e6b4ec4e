use super::{Publication, Publisher};
use crate::events::{Event, EventParams};

/// Publisher for tests: builds the event and schedules nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TestPublisher;

impl Publisher for TestPublisher {
    fn call(&self, event_name: &str, event_params: EventParams) -> Event {
        Publication::new(event_name, event_params).into_event()
    }
}

//! Published event and publish payload types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::Result;

/// Arbitrary parameters attached to a published event.
pub type EventParams = Map<String, Value>;

/// One publication of a named event.
///
/// Created exactly once per publish call and returned to the caller as a
/// receipt. The id is generated at construction and never reassigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: Uuid,
    name: String,
    params: EventParams,
}

impl Event {
    /// Creates an event with a fresh random id.
    pub fn new(name: impl Into<String>, params: EventParams) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            params,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &EventParams {
        &self.params
    }

    /// Builds the payload the publish job re-delivers to the dispatcher.
    pub fn publish_payload(&self) -> PublishPayload {
        PublishPayload {
            event_id: self.id.to_string(),
            event_name: self.name.clone(),
            event_params: self.params.clone(),
        }
    }
}

/// Serialized form of a publication, as handed to the job system.
///
/// `event_id` is kept as a plain string: payloads come back from the job
/// system and are dispatched whether or not they carry a UUID.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishPayload {
    #[serde(default)]
    pub event_id: String,
    pub event_name: String,
    #[serde(default)]
    pub event_params: EventParams,
}

impl PublishPayload {
    pub fn new(
        event_id: impl Into<String>,
        event_name: impl Into<String>,
        event_params: EventParams,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            event_name: event_name.into(),
            event_params,
        }
    }

    /// Parses a payload received from the job system.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Converts the payload into the JSON object enqueued on the job system.
    pub fn into_value(self) -> Value {
        let mut object = Map::with_capacity(3);
        object.insert(
            crate::constants::EVENT_ID_KEY.to_string(),
            Value::String(self.event_id),
        );
        object.insert(
            crate::constants::EVENT_NAME_KEY.to_string(),
            Value::String(self.event_name),
        );
        object.insert(
            crate::constants::EVENT_PARAMS_KEY.to_string(),
            Value::Object(self.event_params),
        );
        Value::Object(object)
    }
}

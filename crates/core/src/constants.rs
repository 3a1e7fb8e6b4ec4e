/// Payload key carrying the event id
pub const EVENT_ID_KEY: &str = "event_id";

/// Payload key carrying the event name
pub const EVENT_NAME_KEY: &str = "event_name";

/// Payload key carrying the event params
pub const EVENT_PARAMS_KEY: &str = "event_params";

/// Env var naming the publish job
pub const PUBLISH_JOB_ENV: &str = "HERALD_PUBLISH_JOB";

/// Env var selecting the publisher (`job` or `test`)
pub const PUBLISHER_ENV: &str = "HERALD_PUBLISHER";

/// Env var selecting the published events sink (`discarding` or `retaining`)
pub const PUBLISHED_EVENTS_ENV: &str = "HERALD_PUBLISHED_EVENTS";

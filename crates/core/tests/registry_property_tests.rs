//! Property-based integration tests for the subscriptions registry and the
//! pub/sub façade.
//!
//! These tests verify that registry and publishing invariants hold across
//! generated event names, jobs, and params, using `proptest`.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use herald_core::events::{EventParams, PublishPayload};
use herald_core::jobs::{Job, JobCatalog, JobQueue, QueuedJob, RecordingJobQueue};
use herald_core::subscriptions::{Subscription, Subscriptions};
use herald_core::{PubSub, PubSubConfig};

// =============================================================================
// Generators
// =============================================================================

/// Generates an ASCII event name.
fn arb_event_name() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,15}"
}

/// Generates the same name with a random per-character case.
fn arb_case_variant(name: String) -> impl Strategy<Value = (String, String)> {
    proptest::collection::vec(any::<bool>(), name.len()).prop_map(move |flips| {
        let variant: String = name
            .chars()
            .zip(flips)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect();
        (name.clone(), variant)
    })
}

/// Generates a job name from a small pool so that collisions happen.
fn arb_job_name() -> impl Strategy<Value = String> {
    (0u8..6).prop_map(|i| format!("Job{i}"))
}

/// Generates flat event params.
fn arb_params() -> impl Strategy<Value = EventParams> {
    proptest::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..5).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(key, value)| (key, json!(value)))
            .collect()
    })
}

fn job(name: &str, queue: &Arc<RecordingJobQueue>) -> Arc<dyn Job> {
    let queue: Arc<dyn JobQueue> = queue.clone();
    Arc::new(QueuedJob::new(name, queue))
}

fn job_names(subscriptions: &[Subscription]) -> Vec<String> {
    subscriptions
        .iter()
        .map(|s| s.job_name().to_string())
        .collect()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Lookups for names differing only in case return the same subscriptions.
    #[test]
    fn prop_lookup_ignores_case(
        (name, variant) in arb_event_name().prop_flat_map(arb_case_variant),
        jobs in proptest::collection::vec(arb_job_name(), 1..6),
    ) {
        let queue = Arc::new(RecordingJobQueue::new());
        let registry = Subscriptions::new();
        for job_name in &jobs {
            registry.add(Subscription::new(variant.clone(), job(job_name, &queue)).unwrap());
        }

        prop_assert_eq!(
            job_names(&registry.for_event(&name)),
            job_names(&registry.for_event(&variant))
        );
        prop_assert_eq!(
            job_names(&registry.for_event(&name.to_uppercase())),
            job_names(&registry.for_event(&variant))
        );
    }

    /// A job added any number of times to one event is registered once, and
    /// registration order of distinct jobs is kept.
    #[test]
    fn prop_duplicates_are_dropped(
        name in arb_event_name(),
        jobs in proptest::collection::vec(arb_job_name(), 1..20),
    ) {
        let queue = Arc::new(RecordingJobQueue::new());
        let registry = Subscriptions::new();
        for job_name in &jobs {
            registry.add(Subscription::new(name.clone(), job(job_name, &queue)).unwrap());
        }

        let mut seen = HashSet::new();
        let expected: Vec<String> = jobs
            .iter()
            .filter(|job_name| seen.insert(job_name.as_str()))
            .cloned()
            .collect();
        prop_assert_eq!(job_names(&registry.for_event(&name)), expected);
    }

    /// Dispatch enqueues every job subscribed to the event exactly once and
    /// no job subscribed only to other events.
    #[test]
    fn prop_dispatch_reaches_exactly_the_subscribers(
        registrations in proptest::collection::vec((arb_event_name(), arb_job_name()), 0..20),
        target in arb_event_name(),
        params in arb_params(),
    ) {
        let queue = Arc::new(RecordingJobQueue::new());
        let registry = Subscriptions::new();
        for (event_name, job_name) in &registrations {
            registry.add(Subscription::new(event_name.clone(), job(job_name, &queue)).unwrap());
        }

        let expected: HashSet<&str> = registrations
            .iter()
            .filter(|(event_name, _)| event_name.to_lowercase() == target.to_lowercase())
            .map(|(_, job_name)| job_name.as_str())
            .collect();

        let summary = registry.dispatch(&PublishPayload::new("x", target.clone(), params.clone()));

        let mut counts: HashMap<String, usize> = HashMap::new();
        for enqueued in queue.jobs() {
            prop_assert_eq!(&enqueued.payload, &Value::Object(params.clone()));
            *counts.entry(enqueued.job_class).or_insert(0) += 1;
        }
        prop_assert_eq!(summary.len(), expected.len());
        prop_assert_eq!(counts.len(), expected.len());
        for job_name in expected {
            prop_assert_eq!(counts.get(job_name).copied(), Some(1));
        }
    }

    /// Publishing returns an event carrying the given name and params, and the
    /// retaining sink's last event is that event.
    #[test]
    fn prop_publish_returns_the_published_event(
        name in arb_event_name(),
        params in arb_params(),
    ) {
        let pubsub = PubSub::new(
            PubSubConfig::testing(),
            JobCatalog::new(),
            Arc::new(Subscriptions::new()),
        )
        .unwrap();

        let first = pubsub.publish(&name, params.clone());
        let second = pubsub.publish(&name, params.clone());

        prop_assert_eq!(second.name(), name.as_str());
        prop_assert_eq!(second.params(), &params);
        prop_assert_ne!(first.id(), second.id());
        let published = pubsub.published_events();
        prop_assert_eq!(published.last(), Some(&second));
    }
}

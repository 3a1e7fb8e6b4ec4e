//! Subscriptions registry and dispatcher.
//!
//! Subscriptions are bucketed by normalized (lower-cased) event name. Each
//! bucket keeps registration order and never holds the same job twice.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info, warn};

use super::Subscription;
use crate::events::PublishPayload;

/// Normalizes an event name for registry lookups.
pub fn normalize_event_name(name: &str) -> String {
    name.to_lowercase()
}

/// What a single dispatch did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub event_id: String,
    pub event_name: String,
    /// Jobs enqueued, in registration order.
    pub job_names: Vec<String>,
    /// Jobs the job system refused, in registration order.
    pub failed_job_names: Vec<String>,
}

impl DispatchSummary {
    pub fn len(&self) -> usize {
        self.job_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.job_names.is_empty()
    }
}

/// Registry of subscriptions keyed by normalized event name.
///
/// Populated during the host's registration pass and read on every
/// dispatch. The lock allows late registrations without tearing a dispatch.
#[derive(Debug, Default)]
pub struct Subscriptions {
    subscriptions: RwLock<HashMap<String, Vec<Subscription>>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscription under its normalized event name.
    ///
    /// Returns `false` when the bucket already holds the same job.
    pub fn add(&self, subscription: Subscription) -> bool {
        let key = normalize_event_name(subscription.event_name());
        let mut subscriptions = self.write();
        let bucket = subscriptions.entry(key).or_default();

        if bucket.contains(&subscription) {
            debug!(
                "Skipping duplicate subscription of {} to {:?}",
                subscription.job_name(),
                subscription.event_name()
            );
            return false;
        }

        debug!(
            "Subscribed {} to {:?}",
            subscription.job_name(),
            subscription.event_name()
        );
        bucket.push(subscription);
        true
    }

    /// Subscriptions for an event name, in registration order.
    pub fn for_event(&self, event_name: &str) -> Vec<Subscription> {
        self.read()
            .get(&normalize_event_name(event_name))
            .cloned()
            .unwrap_or_default()
    }

    /// Calls every subscription registered for the payload's event name.
    ///
    /// All jobs are enqueued before this returns; none are awaited. A job the
    /// job system refuses is logged, reported in `failed_job_names` and
    /// skipped. No subscriptions is not an error.
    pub fn dispatch(&self, payload: &PublishPayload) -> DispatchSummary {
        let subscriptions = self.for_event(&payload.event_name);
        let mut job_names = Vec::with_capacity(subscriptions.len());
        let mut failed_job_names = Vec::new();

        for subscription in &subscriptions {
            let job_name = subscription.job_name().to_string();
            match subscription.call(&payload.event_params) {
                Ok(_) => job_names.push(job_name),
                Err(e) => {
                    warn!(
                        "Failed to enqueue subscription job {} for {:?} ({}): {}",
                        job_name, payload.event_name, payload.event_id, e
                    );
                    failed_job_names.push(job_name);
                }
            }
        }

        let details = job_names
            .iter()
            .map(|name| format!("  - {name}"))
            .collect::<Vec<_>>()
            .join("\n");
        info!(
            "Dispatched {} subscription job(s) for {:?} ({}), {} refused:\n{}",
            job_names.len(),
            payload.event_name,
            payload.event_id,
            failed_job_names.len(),
            details
        );

        DispatchSummary {
            event_id: payload.event_id.clone(),
            event_name: payload.event_name.clone(),
            job_names,
            failed_job_names,
        }
    }

    /// Normalized event names with at least one subscription, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .read()
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Total number of subscriptions across all event names.
    pub fn len(&self) -> usize {
        self.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<Subscription>>> {
        self.subscriptions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<Subscription>>> {
        self.subscriptions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

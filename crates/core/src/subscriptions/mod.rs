//! Subscriptions module - subscriptions and the registry that dispatches to them.

mod subscription;
mod subscriptions_registry;


// Re-export the public interface
pub use subscription::Subscription;
pub use subscriptions_registry::{normalize_event_name, DispatchSummary, Subscriptions};

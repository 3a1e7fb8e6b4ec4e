//! Publishers module - strategies that turn a publish call into an event.
//!
//! [`JobPublisher`] enqueues the publication on the publish job;
//! [`TestPublisher`] only builds the event.

mod job_publisher;
mod publication;
mod publishers_traits;
mod test_publisher;

// Re-export the public interface
pub use job_publisher::{JobPublication, JobPublisher};
pub use publication::Publication;
pub use publishers_traits::Publisher;
pub use test_publisher::TestPublisher;

//! Job catalog: explicit name → job registry used to resolve job references.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use super::{Job, JobRef};
use crate::errors::{Error, JobKind, Result};

/// Registry of the jobs the host makes available to pub/sub.
///
/// Populated once at startup. Lookups are by exact (case sensitive) name.
#[derive(Clone, Default)]
pub struct JobCatalog {
    jobs: HashMap<String, Arc<dyn Job>>,
}

impl JobCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a job under its name, replacing any job with the same name.
    pub fn register(&mut self, job: Arc<dyn Job>) -> &mut Self {
        let name = job.name().to_string();
        debug!("Registering job class {}", name);
        if self.jobs.insert(name.clone(), job).is_some() {
            debug!("Job class {} replaced an earlier registration", name);
        }
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with_job(mut self, job: Arc<dyn Job>) -> Self {
        self.register(job);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.jobs.contains_key(name)
    }

    /// Registered job names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.jobs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Resolves a job reference for the given role.
    pub fn resolve_job(&self, reference: &JobRef, kind: JobKind) -> Result<Arc<dyn Job>> {
        self.jobs
            .get(reference.name())
            .cloned()
            .ok_or_else(|| Error::unknown_job(kind, Some(reference.name())))
    }

    /// Resolves the publish job and checks that it declares the publish job
    /// contract and can be enqueued.
    pub fn resolve_publish_job(&self, reference: Option<&str>) -> Result<Arc<dyn Job>> {
        let reference = reference.ok_or_else(|| Error::unknown_job(JobKind::Publish, None))?;
        let job = self.resolve_job(&JobRef::from(reference), JobKind::Publish)?;

        if !Self::is_publish_job(job.as_ref()) {
            return Err(Error::ContractViolation(job.name().to_string()));
        }
        if job.as_perform_later().is_none() {
            return Err(Error::InvalidHandler(job.name().to_string()));
        }

        Ok(job)
    }

    /// Whether a job explicitly declares the publish job contract.
    pub fn is_publish_job(job: &dyn Job) -> bool {
        job.as_publish_job().is_some()
    }
}

impl fmt::Debug for JobCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobCatalog")
            .field("jobs", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{DispatchJob, JobQueue, PerformLater, PublishJob, QueuedJob, RecordingJobQueue};
    use crate::subscriptions::Subscriptions;

    /// Exposes a `perform`-shaped entry point without declaring the contract.
    struct LookalikeJob {
        inner: QueuedJob,
        subscriptions: Subscriptions,
    }

    impl Job for LookalikeJob {
        fn name(&self) -> &str {
            "LookalikeJob"
        }

        fn as_perform_later(&self) -> Option<&dyn PerformLater> {
            Some(&self.inner)
        }
    }

    impl PublishJob for LookalikeJob {
        fn subscriptions(&self) -> &Subscriptions {
            &self.subscriptions
        }
    }

    /// Declares the contract but cannot be enqueued.
    struct InlinePublishJob {
        subscriptions: Subscriptions,
    }

    impl Job for InlinePublishJob {
        fn name(&self) -> &str {
            "InlinePublishJob"
        }

        fn as_publish_job(&self) -> Option<&dyn PublishJob> {
            Some(self)
        }
    }

    impl PublishJob for InlinePublishJob {
        fn subscriptions(&self) -> &Subscriptions {
            &self.subscriptions
        }
    }

    fn catalog() -> JobCatalog {
        let queue: Arc<dyn JobQueue> = Arc::new(RecordingJobQueue::new());
        JobCatalog::new()
            .with_job(Arc::new(DispatchJob::new(
                "PublishJob",
                queue.clone(),
                Arc::new(Subscriptions::new()),
            )))
            .with_job(Arc::new(QueuedJob::new("NotifyJob", queue.clone())))
            .with_job(Arc::new(LookalikeJob {
                inner: QueuedJob::new("LookalikeJob", queue),
                subscriptions: Subscriptions::new(),
            }))
            .with_job(Arc::new(InlinePublishJob {
                subscriptions: Subscriptions::new(),
            }))
    }

    #[test]
    fn test_resolves_registered_jobs() {
        let catalog = catalog();

        let job = catalog
            .resolve_job(&JobRef::from("NotifyJob"), JobKind::Subscription)
            .unwrap();
        assert_eq!(job.name(), "NotifyJob");
        assert_eq!(
            catalog.names(),
            vec!["InlinePublishJob", "LookalikeJob", "NotifyJob", "PublishJob"]
        );
    }

    #[test]
    fn test_resolves_job_handles_by_name() {
        let catalog = catalog();
        let queue: Arc<dyn JobQueue> = Arc::new(RecordingJobQueue::new());

        let registered: Arc<dyn Job> = Arc::new(QueuedJob::new("NotifyJob", queue.clone()));
        let job = catalog
            .resolve_job(&JobRef::from(registered), JobKind::Subscription)
            .unwrap();
        assert_eq!(job.name(), "NotifyJob");

        let unregistered: Arc<dyn Job> = Arc::new(QueuedJob::new("BillJob", queue));
        let err = catalog
            .resolve_job(&JobRef::from(unregistered), JobKind::Subscription)
            .err().unwrap();
        assert_eq!(err.to_string(), "Unknown subscription job class: \"BillJob\".");
    }

    #[test]
    fn test_unknown_job_is_rejected() {
        let err = catalog()
            .resolve_job(&JobRef::from("SomeUnknownInvalidClass"), JobKind::Subscription)
            .err().unwrap();

        assert!(matches!(
            err,
            Error::UnknownJob {
                kind: JobKind::Subscription,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Unknown subscription job class: "));
    }

    #[test]
    fn test_lookups_are_case_sensitive() {
        assert!(catalog().contains("NotifyJob"));
        assert!(!catalog().contains("notifyjob"));
    }

    #[test]
    fn test_resolves_publish_job() {
        let job = catalog().resolve_publish_job(Some("PublishJob")).unwrap();

        assert_eq!(job.name(), "PublishJob");
        assert!(JobCatalog::is_publish_job(job.as_ref()));
    }

    #[test]
    fn test_publish_job_must_be_configured_and_known() {
        let err = catalog().resolve_publish_job(None).err().unwrap();
        assert_eq!(err.to_string(), "Unknown publish job class: nil.");

        let err = catalog()
            .resolve_publish_job(Some("UnknownPublishJob"))
            .err().unwrap();
        assert_eq!(
            err.to_string(),
            "Unknown publish job class: \"UnknownPublishJob\"."
        );
    }

    #[test]
    fn test_publish_job_must_declare_the_contract() {
        let err = catalog().resolve_publish_job(Some("NotifyJob")).err().unwrap();
        assert!(matches!(err, Error::ContractViolation(ref name) if name == "NotifyJob"));

        // A job with a matching `perform` but no declaration is still rejected.
        let err = catalog()
            .resolve_publish_job(Some("LookalikeJob"))
            .err().unwrap();
        assert!(matches!(err, Error::ContractViolation(ref name) if name == "LookalikeJob"));
    }

    #[test]
    fn test_publish_job_must_be_enqueueable() {
        let err = catalog()
            .resolve_publish_job(Some("InlinePublishJob"))
            .err().unwrap();
        assert!(matches!(err, Error::InvalidHandler(ref name) if name == "InlinePublishJob"));
    }
}

// src/tracker.rs
//! Per-job application state machine. This is the consistency-sensitive
//! piece: a job must never be submitted twice, and a settled `Applied`
//! status must never regress, regardless of click timing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::api::MarketplaceApi;
use crate::errors::ClientError;
use crate::models::{ApplicationStatus, ApplicationSubmission, JobPosting};

#[derive(Debug, Clone)]
pub struct ApplicationRecord {
    pub status: ApplicationStatus,
    pub updated_at: DateTime<Utc>,
}

/// Tracks submission status per job for the lifetime of the session.
/// Records are created lazily; never-seen jobs read as `NotApplied`.
pub struct ApplicationTracker {
    actor_id: String,
    records: HashMap<String, ApplicationRecord>,
}

impl ApplicationTracker {
    pub fn new(actor_id: String) -> Self {
        Self {
            actor_id,
            records: HashMap::new(),
        }
    }

    pub fn status_of(&self, job_id: &str) -> ApplicationStatus {
        self.records
            .get(job_id)
            .map(|r| r.status)
            .unwrap_or(ApplicationStatus::NotApplied)
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &ApplicationRecord)> {
        self.records.iter().map(|(id, r)| (id.as_str(), r))
    }

    /// Submit an application for `job`. Guards:
    /// - empty candidate name fails fast, no request, no transition;
    /// - a `Pending` or `Applied` job is a no-op (the duplicate click is
    ///   dropped, not queued), returning the current status.
    ///
    /// The `Pending` transition happens before the request is issued so a
    /// caller can disable its control immediately.
    pub async fn apply(
        &mut self,
        api: &impl MarketplaceApi,
        job: &JobPosting,
        candidate_name: &str,
    ) -> Result<ApplicationStatus, ClientError> {
        if candidate_name.trim().is_empty() {
            return Err(ClientError::Precondition(
                "Complete your profile before applying".to_string(),
            ));
        }

        if !self.begin(&job.job_id) {
            let current = self.status_of(&job.job_id);
            debug!("Dropping duplicate apply for job {} ({})", job.job_id, current);
            return Ok(current);
        }

        let submission = ApplicationSubmission::new(&self.actor_id, candidate_name, job);
        match api.submit_application(&submission).await {
            Ok(()) => {
                self.settle(&job.job_id, ApplicationStatus::Applied);
                info!("Application accepted for job {}", job.job_id);
                Ok(ApplicationStatus::Applied)
            }
            Err(e) => {
                self.settle(&job.job_id, ApplicationStatus::Failed);
                warn!("Application for job {} failed: {}", job.job_id, e);
                Err(e)
            }
        }
    }

    /// Transition to `Pending` if allowed. Returns false when the job is
    /// already in flight or settled as `Applied`; `Failed` re-enters.
    fn begin(&mut self, job_id: &str) -> bool {
        match self.status_of(job_id) {
            ApplicationStatus::Pending | ApplicationStatus::Applied => false,
            ApplicationStatus::NotApplied | ApplicationStatus::Failed => {
                self.transition(job_id, ApplicationStatus::Pending);
                true
            }
        }
    }

    /// Record the outcome of an in-flight submission. `Applied` is
    /// terminal: a settle against an applied job is discarded.
    fn settle(&mut self, job_id: &str, status: ApplicationStatus) {
        if self.status_of(job_id) == ApplicationStatus::Applied {
            debug!("Ignoring settle for already-applied job {}", job_id);
            return;
        }
        self.transition(job_id, status);
    }

    fn transition(&mut self, job_id: &str, status: ApplicationStatus) {
        self.records.insert(
            job_id.to_string(),
            ApplicationRecord {
                status,
                updated_at: Utc::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{sample_job, MockApi};

    fn tracker() -> ApplicationTracker {
        ApplicationTracker::new("u1".to_string())
    }

    #[test]
    fn test_unseen_job_reads_not_applied() {
        assert_eq!(tracker().status_of("never-seen"), ApplicationStatus::NotApplied);
    }

    #[test]
    fn test_begin_guard_drops_second_attempt_while_pending() {
        let mut t = tracker();
        assert!(t.begin("j1"));
        assert_eq!(t.status_of("j1"), ApplicationStatus::Pending);
        assert!(!t.begin("j1"));
    }

    #[test]
    fn test_applied_is_terminal() {
        let mut t = tracker();
        assert!(t.begin("j1"));
        t.settle("j1", ApplicationStatus::Applied);

        assert!(!t.begin("j1"));
        t.settle("j1", ApplicationStatus::Failed);
        assert_eq!(t.status_of("j1"), ApplicationStatus::Applied);
    }

    #[test]
    fn test_failed_job_may_retry() {
        let mut t = tracker();
        assert!(t.begin("j1"));
        t.settle("j1", ApplicationStatus::Failed);
        assert!(t.begin("j1"));
        assert_eq!(t.status_of("j1"), ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn test_apply_with_empty_name_issues_no_request() {
        let api = MockApi::default();
        let mut t = tracker();

        let err = t.apply(&api, &sample_job("j1", 80.0), "  ").await.unwrap_err();
        assert!(matches!(err, ClientError::Precondition(_)));
        assert_eq!(api.submission_count(), 0);
        assert_eq!(t.status_of("j1"), ApplicationStatus::NotApplied);
    }

    #[tokio::test]
    async fn test_apply_success_then_reapply_is_noop() {
        let api = MockApi::default();
        let mut t = tracker();
        let job = sample_job("j1", 80.0);

        let status = t.apply(&api, &job, "Asha").await.unwrap();
        assert_eq!(status, ApplicationStatus::Applied);
        assert_eq!(api.submission_count(), 1);

        let status = t.apply(&api, &job, "Asha").await.unwrap();
        assert_eq!(status, ApplicationStatus::Applied);
        assert_eq!(api.submission_count(), 1);
    }

    #[tokio::test]
    async fn test_apply_while_pending_issues_no_second_request() {
        let api = MockApi::default();
        let mut t = tracker();
        let job = sample_job("j1", 80.0);

        // First submission is still in flight.
        assert!(t.begin("j1"));

        let status = t.apply(&api, &job, "Asha").await.unwrap();
        assert_eq!(status, ApplicationStatus::Pending);
        assert_eq!(api.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_apply_fails_and_permits_retry() {
        let api = MockApi::default();
        api.queue_submit_failure(ClientError::Validation("Already applied".into()));
        let mut t = tracker();
        let job = sample_job("j2", 54.0);

        let err = t.apply(&api, &job, "Asha").await.unwrap_err();
        assert_eq!(err, ClientError::Validation("Already applied".into()));
        assert_eq!(t.status_of("j2"), ApplicationStatus::Failed);

        // Retry goes back through Pending and can succeed.
        let status = t.apply(&api, &job, "Asha").await.unwrap();
        assert_eq!(status, ApplicationStatus::Applied);
        assert_eq!(api.submission_count(), 2);
    }

    #[tokio::test]
    async fn test_submission_payload_carries_job_fields() {
        let api = MockApi::default();
        let mut t = tracker();
        let job = sample_job("j1", 80.0);

        t.apply(&api, &job, "Asha").await.unwrap();

        let submissions = api.submissions.lock().unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].user_id, "u1");
        assert_eq!(submissions[0].user_name, "Asha");
        assert_eq!(submissions[0].job_title, job.job_title);
        assert_eq!(submissions[0].company_name, "Acme");
        assert_eq!(submissions[0].deadline, Some(10));
    }
}

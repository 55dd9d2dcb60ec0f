// src/facade.rs
//! The operation surface the UI layer talks to. Composes the profile
//! store, retriever and tracker, orders their calls, and downgrades
//! component failures into the three user-facing categories.

use crate::api::MarketplaceApi;
use crate::errors::EngagementError;
use crate::models::{ApplicationStatus, JobPosting, ProfileFields, ProfileState};
use crate::profile::ProfileStore;
use crate::recommend::RecommendationRetriever;
use crate::session::Identity;
use crate::tracker::{ApplicationRecord, ApplicationTracker};

pub struct EngagementFacade<A: MarketplaceApi> {
    api: A,
    identity: Identity,
    profile: ProfileStore,
    recommendations: RecommendationRetriever,
    tracker: ApplicationTracker,
}

impl<A: MarketplaceApi> EngagementFacade<A> {
    pub fn new(api: A, identity: Identity) -> Self {
        let actor_id = identity.actor_id.clone();
        Self {
            api,
            identity,
            profile: ProfileStore::new(actor_id.clone()),
            recommendations: RecommendationRetriever::new(),
            tracker: ApplicationTracker::new(actor_id),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn profile(&self) -> &ProfileState {
        self.profile.state()
    }

    /// The currently displayable recommendation list (already truncated).
    pub fn recommendations(&self) -> &[JobPosting] {
        self.recommendations.display()
    }

    pub fn status_of(&self, job_id: &str) -> ApplicationStatus {
        self.tracker.status_of(job_id)
    }

    pub fn application_records(&self) -> impl Iterator<Item = (&str, &ApplicationRecord)> {
        self.tracker.records()
    }

    pub async fn load_profile(&mut self) -> Result<&ProfileState, EngagementError> {
        self.profile
            .load(&self.api)
            .await
            .map_err(EngagementError::from)
    }

    pub async fn save_profile(&mut self, fields: ProfileFields) -> Result<String, EngagementError> {
        self.profile
            .save(&self.api, fields)
            .await
            .map_err(EngagementError::from)
    }

    /// Refuses with `Blocked` until a profile id exists; the retriever is
    /// never reached (and no request is made) for a draft profile.
    pub async fn refresh_recommendations(&mut self) -> Result<&[JobPosting], EngagementError> {
        let profile_id = match self.profile.state() {
            ProfileState::Persisted { id, .. } => id.clone(),
            ProfileState::Draft(_) => {
                return Err(EngagementError::Blocked(
                    "Save your profile before requesting recommendations".to_string(),
                ))
            }
        };

        self.recommendations
            .fetch(&self.api, &profile_id)
            .await
            .map_err(EngagementError::from)
    }

    /// Apply to a job from the current recommendation list.
    pub async fn apply_to_job(&mut self, job_id: &str) -> Result<ApplicationStatus, EngagementError> {
        let job = match self.recommendations.find(job_id) {
            Some(job) => job.clone(),
            None => {
                return Err(EngagementError::Blocked(format!(
                    "Job {} is not in the current recommendations",
                    job_id
                )))
            }
        };

        let candidate_name = self.profile.state().fields().full_name.clone();
        self.tracker
            .apply(&self.api, &job, &candidate_name)
            .await
            .map_err(EngagementError::from)
    }
}

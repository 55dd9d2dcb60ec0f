// src/recommend.rs
//! Recommendation retriever - holds the last fetched ranked list.

use tracing::info;

use crate::api::MarketplaceApi;
use crate::errors::ClientError;
use crate::models::JobPosting;

/// Display policy: at most this many openings are shown. The full server
/// ordering is kept; truncation is reproducible for a given response.
pub const DISPLAY_LIMIT: usize = 4;

#[derive(Default)]
pub struct RecommendationRetriever {
    jobs: Vec<JobPosting>,
}

impl RecommendationRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the ranked list for a persisted profile. The previous list is
    /// fully replaced, never merged; the server's descending-score order is
    /// kept as-is.
    pub async fn fetch(
        &mut self,
        api: &impl MarketplaceApi,
        profile_id: &str,
    ) -> Result<&[JobPosting], ClientError> {
        let jobs = api.recommendations(profile_id).await?;
        info!("Fetched {} recommendations for profile {}", jobs.len(), profile_id);
        self.jobs = jobs;
        Ok(self.display())
    }

    /// The truncated list the UI renders.
    pub fn display(&self) -> &[JobPosting] {
        let end = self.jobs.len().min(DISPLAY_LIMIT);
        &self.jobs[..end]
    }

    pub fn find(&self, job_id: &str) -> Option<&JobPosting> {
        self.jobs.iter().find(|job| job.job_id == job_id)
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

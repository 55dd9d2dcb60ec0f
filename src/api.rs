// src/api.rs
//! HTTP boundary to the marketplace service - JSON over REST.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::models::{
    ApplicantRow, ApplicationSubmission, CandidateRecord, InternshipDraft, JobPosting,
    ProfileFields,
};

const CANDIDATES_ENDPOINT: &str = "/candidates";
const RECOMMENDATIONS_ENDPOINT: &str = "/recommendations";
const APPLICATIONS_ENDPOINT: &str = "/applications";
const INTERNSHIPS_ENDPOINT: &str = "/internships";
const LOGIN_ENDPOINT: &str = "/login";
const REGISTER_ENDPOINT: &str = "/register";

/// The marketplace operations the client depends on. The production
/// implementation is [`HttpApi`]; tests substitute an in-memory double.
#[async_trait]
pub trait MarketplaceApi {
    /// Stored profile for the actor, or `None` if none exists yet.
    async fn fetch_candidate(&self, actor_id: &str)
        -> Result<Option<CandidateRecord>, ClientError>;

    /// Upsert the profile; returns the canonical profile id.
    async fn save_candidate(
        &self,
        fields: &ProfileFields,
        actor_id: &str,
    ) -> Result<String, ClientError>;

    /// Ranked openings for a persisted profile, ordered by the server.
    async fn recommendations(&self, profile_id: &str) -> Result<Vec<JobPosting>, ClientError>;

    async fn submit_application(&self, submission: &ApplicationSubmission)
        -> Result<(), ClientError>;

    async fn post_internship(
        &self,
        draft: &InternshipDraft,
        company_id: &str,
    ) -> Result<(), ClientError>;

    async fn company_applications(
        &self,
        company_id: &str,
    ) -> Result<Vec<ApplicantRow>, ClientError>;

    /// Returns the server-assigned user id.
    async fn login(&self, credentials: &Credentials) -> Result<String, ClientError>;

    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError>;
}

#[derive(Debug, Deserialize)]
struct SavedCandidate {
    id: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed client for the marketplace REST service.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

/// Read the failure body. Structured `{error}` bodies yield `Validation`
/// with the server's reason; anything else is a generic `Fetch`.
async fn rejection(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => ClientError::Validation(body.error),
        Err(_) => ClientError::Fetch(format!("HTTP {}: {}", status, text)),
    }
}

#[async_trait]
impl MarketplaceApi for HttpApi {
    async fn fetch_candidate(
        &self,
        actor_id: &str,
    ) -> Result<Option<CandidateRecord>, ClientError> {
        let url = format!("{}/{}", self.url(CANDIDATES_ENDPOINT), actor_id);
        debug!("Fetching candidate profile: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if status.is_success() {
            let record = response
                .json::<CandidateRecord>()
                .await
                .map_err(|e| ClientError::Fetch(format!("Malformed profile response: {}", e)))?;
            Ok(Some(record))
        } else {
            let text = response.text().await.unwrap_or_default();
            error!("Profile fetch failed with status {}: {}", status, text);
            Err(ClientError::Fetch(format!("HTTP {}: {}", status, text)))
        }
    }

    async fn save_candidate(
        &self,
        fields: &ProfileFields,
        actor_id: &str,
    ) -> Result<String, ClientError> {
        let url = self.url(CANDIDATES_ENDPOINT);
        let payload = serde_json::json!({
            "name": fields.full_name,
            "skills": fields.skills,
            "location": fields.location,
            "education": fields.education,
            "stream": fields.stream,
            "user_id": actor_id,
        });

        info!("Saving candidate profile for {}", actor_id);
        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();

        if status.is_success() {
            let saved = response
                .json::<SavedCandidate>()
                .await
                .map_err(|e| ClientError::Fetch(format!("Malformed save response: {}", e)))?;
            Ok(saved.id)
        } else if status.is_client_error() {
            Err(rejection(response).await)
        } else {
            let text = response.text().await.unwrap_or_default();
            error!("Profile save failed with status {}: {}", status, text);
            Err(ClientError::Fetch(format!("HTTP {}: {}", status, text)))
        }
    }

    async fn recommendations(&self, profile_id: &str) -> Result<Vec<JobPosting>, ClientError> {
        let url = format!("{}/{}", self.url(RECOMMENDATIONS_ENDPOINT), profile_id);
        debug!("Fetching recommendations: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            response
                .json::<Vec<JobPosting>>()
                .await
                .map_err(|e| ClientError::Fetch(format!("Malformed recommendations: {}", e)))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::Fetch(format!("HTTP {}: {}", status, text)))
        }
    }

    async fn submit_application(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<(), ClientError> {
        let url = self.url(APPLICATIONS_ENDPOINT);
        info!(
            "Submitting application for job {} by {}",
            submission.job_id, submission.user_id
        );

        let response = self.client.post(&url).json(submission).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(rejection(response).await)
        }
    }

    async fn post_internship(
        &self,
        draft: &InternshipDraft,
        company_id: &str,
    ) -> Result<(), ClientError> {
        let url = self.url(INTERNSHIPS_ENDPOINT);

        let mut payload = serde_json::to_value(draft)
            .map_err(|e| ClientError::Fetch(format!("Failed to encode posting: {}", e)))?;
        payload["companyId"] = serde_json::Value::String(company_id.to_string());

        info!("Posting internship for company {}", company_id);
        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            error!("Internship post failed with status {}: {}", status, text);
            Err(ClientError::Fetch(format!("HTTP {}: {}", status, text)))
        }
    }

    async fn company_applications(
        &self,
        company_id: &str,
    ) -> Result<Vec<ApplicantRow>, ClientError> {
        let url = format!("{}/company/{}", self.url(APPLICATIONS_ENDPOINT), company_id);
        debug!("Fetching applicants: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            response
                .json::<Vec<ApplicantRow>>()
                .await
                .map_err(|e| ClientError::Fetch(format!("Malformed applicant list: {}", e)))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::Fetch(format!("HTTP {}: {}", status, text)))
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, ClientError> {
        let url = self.url(LOGIN_ENDPOINT);
        let response = self.client.post(&url).json(credentials).send().await?;

        if response.status().is_success() {
            let body = response
                .json::<LoginResponse>()
                .await
                .map_err(|e| ClientError::Fetch(format!("Malformed login response: {}", e)))?;
            Ok(body.user_id)
        } else {
            Err(rejection(response).await)
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        let url = self.url(REGISTER_ENDPOINT);
        let response = self.client.post(&url).json(credentials).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(rejection(response).await)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory stand-in for the marketplace service, shared by the unit
    //! tests of the stores, tracker and facade.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    pub(crate) struct MockApi {
        pub candidate: Mutex<Option<CandidateRecord>>,
        pub assigned_id: String,
        pub jobs: Mutex<Vec<JobPosting>>,
        pub submissions: Mutex<Vec<ApplicationSubmission>>,
        pub submit_outcomes: Mutex<VecDeque<Result<(), ClientError>>>,
        pub recommendation_calls: Mutex<usize>,
        pub posted: Mutex<Vec<String>>,
        pub applicants: Mutex<Vec<ApplicantRow>>,
        pub login_result: Mutex<Option<Result<String, ClientError>>>,
    }

    impl MockApi {
        pub fn with_assigned_id(id: &str) -> Self {
            Self {
                assigned_id: id.to_string(),
                ..Self::default()
            }
        }

        pub fn set_jobs(&self, jobs: Vec<JobPosting>) {
            *self.jobs.lock().unwrap() = jobs;
        }

        pub fn queue_submit_failure(&self, err: ClientError) {
            self.submit_outcomes.lock().unwrap().push_back(Err(err));
        }

        pub fn submission_count(&self) -> usize {
            self.submissions.lock().unwrap().len()
        }
    }

    pub(crate) fn sample_job(job_id: &str, score: f64) -> JobPosting {
        JobPosting {
            job_id: job_id.to_string(),
            job_title: format!("Intern {}", job_id),
            company_name: "Acme".to_string(),
            job_description: Some("Build things".to_string()),
            location: "Pune".to_string(),
            deadline_days: Some(10),
            openings: 2,
            women_preference: false,
            match_score: score,
            predicted_skill: None,
            predicted_score: None,
        }
    }

    #[async_trait]
    impl MarketplaceApi for MockApi {
        async fn fetch_candidate(
            &self,
            _actor_id: &str,
        ) -> Result<Option<CandidateRecord>, ClientError> {
            Ok(self.candidate.lock().unwrap().clone())
        }

        async fn save_candidate(
            &self,
            fields: &ProfileFields,
            _actor_id: &str,
        ) -> Result<String, ClientError> {
            let record = CandidateRecord {
                id: self.assigned_id.clone(),
                name: fields.full_name.clone(),
                skills: fields.skills.iter().cloned().collect(),
                location: fields.location.clone(),
                education: fields.education.clone(),
                stream: fields.stream.clone(),
            };
            *self.candidate.lock().unwrap() = Some(record);
            Ok(self.assigned_id.clone())
        }

        async fn recommendations(
            &self,
            _profile_id: &str,
        ) -> Result<Vec<JobPosting>, ClientError> {
            *self.recommendation_calls.lock().unwrap() += 1;
            Ok(self.jobs.lock().unwrap().clone())
        }

        async fn submit_application(
            &self,
            submission: &ApplicationSubmission,
        ) -> Result<(), ClientError> {
            self.submissions.lock().unwrap().push(submission.clone());
            self.submit_outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(()))
        }

        async fn post_internship(
            &self,
            _draft: &InternshipDraft,
            company_id: &str,
        ) -> Result<(), ClientError> {
            self.posted.lock().unwrap().push(company_id.to_string());
            Ok(())
        }

        async fn company_applications(
            &self,
            _company_id: &str,
        ) -> Result<Vec<ApplicantRow>, ClientError> {
            Ok(self.applicants.lock().unwrap().clone())
        }

        async fn login(&self, _credentials: &Credentials) -> Result<String, ClientError> {
            self.login_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok("u1".to_string()))
        }

        async fn register(&self, _credentials: &Credentials) -> Result<(), ClientError> {
            Ok(())
        }
    }
}

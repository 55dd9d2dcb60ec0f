// src/models.rs
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Candidate profile fields as edited locally. Skills are a set: order is
/// irrelevant, case is preserved, entries come comma-separated from the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub full_name: String,
    pub skills: BTreeSet<String>,
    pub location: String,
    pub education: String,
    pub stream: String,
}

/// Split a raw comma-separated skills string into a trimmed set.
/// Empty segments are dropped, casing is kept as typed.
pub fn parse_skills(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Profile lifecycle. A profile starts as a draft and becomes persisted on
/// the first successful save; the id never changes afterwards. Whether
/// recommendations can be fetched is a property of this type, not a null
/// check on an id field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileState {
    Draft(ProfileFields),
    Persisted { id: String, fields: ProfileFields },
}

impl ProfileState {
    pub fn fields(&self) -> &ProfileFields {
        match self {
            ProfileState::Draft(fields) => fields,
            ProfileState::Persisted { fields, .. } => fields,
        }
    }

    pub fn profile_id(&self) -> Option<&str> {
        match self {
            ProfileState::Draft(_) => None,
            ProfileState::Persisted { id, .. } => Some(id),
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, ProfileState::Persisted { .. })
    }
}

impl Default for ProfileState {
    fn default() -> Self {
        ProfileState::Draft(ProfileFields::default())
    }
}

/// Stored candidate record as the server returns it from
/// GET /candidates/{actorId}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub stream: String,
}

impl CandidateRecord {
    pub fn into_fields(self) -> ProfileFields {
        ProfileFields {
            full_name: self.name,
            skills: self.skills.into_iter().collect(),
            location: self.location,
            education: self.education,
            stream: self.stream,
        }
    }
}

/// A recommended opening. Everything except `job_id` is opaque display data
/// computed server-side; the client never re-derives scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(rename = "_id")]
    pub job_id: String,
    pub job_title: String,
    pub company_name: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "deadline", default)]
    pub deadline_days: Option<u32>,
    #[serde(default)]
    pub openings: u32,
    #[serde(default)]
    pub women_preference: bool,
    #[serde(rename = "score", default)]
    pub match_score: f64,
    #[serde(default)]
    pub predicted_skill: Option<String>,
    #[serde(default)]
    pub predicted_score: Option<f64>,
}

/// Per-job application status for the session. Transitions only move
/// forward; `Applied` is terminal, `Failed` may re-enter `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    NotApplied,
    Pending,
    Applied,
    Failed,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ApplicationStatus::NotApplied => "not applied",
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// Submission payload for POST /applications.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    pub user_id: String,
    pub user_name: String,
    pub job_id: String,
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub description: String,
    pub deadline: Option<u32>,
}

impl ApplicationSubmission {
    pub fn new(actor_id: &str, candidate_name: &str, job: &JobPosting) -> Self {
        Self {
            user_id: actor_id.to_string(),
            user_name: candidate_name.to_string(),
            job_id: job.job_id.clone(),
            job_title: job.job_title.clone(),
            company_name: job.company_name.clone(),
            location: job.location.clone(),
            description: job
                .job_description
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            deadline: job.deadline_days,
        }
    }
}

/// Opening as drafted by an organization for POST /internships.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipDraft {
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    pub skills_required: Vec<String>,
    pub location: String,
    pub women_preference: bool,
    pub openings: u32,
    pub deadline: Option<u32>,
}

/// One row of GET /applications/company/{companyId}.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRow {
    #[serde(default)]
    pub application_number: u64,
    pub user_name: String,
    pub job_title: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skills_trims_and_dedupes() {
        let skills = parse_skills("React, Node ,React,,  MongoDB");
        let expected: BTreeSet<String> = ["React", "Node", "MongoDB"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(skills, expected);
    }

    #[test]
    fn test_parse_skills_preserves_case() {
        let skills = parse_skills("sql, SQL");
        assert_eq!(skills.len(), 2);
    }

    #[test]
    fn test_job_posting_wire_format() {
        let raw = r#"{
            "_id": "j1",
            "jobTitle": "Backend Intern",
            "companyName": "Acme",
            "jobDescription": "APIs",
            "location": "Pune",
            "deadline": 12,
            "openings": 3,
            "womenPreference": true,
            "score": 82.4,
            "predictedSkill": "Docker",
            "predictedScore": 91.0
        }"#;
        let job: JobPosting = serde_json::from_str(raw).unwrap();
        assert_eq!(job.job_id, "j1");
        assert_eq!(job.deadline_days, Some(12));
        assert_eq!(job.match_score, 82.4);
        assert_eq!(job.predicted_skill.as_deref(), Some("Docker"));
    }

    #[test]
    fn test_job_posting_optional_fields_absent() {
        let raw = r#"{"_id": "j2", "jobTitle": "QA Intern", "companyName": "Beta"}"#;
        let job: JobPosting = serde_json::from_str(raw).unwrap();
        assert_eq!(job.deadline_days, None);
        assert_eq!(job.predicted_skill, None);
        assert!(!job.women_preference);
    }

    #[test]
    fn test_submission_defaults_missing_description() {
        let job: JobPosting =
            serde_json::from_str(r#"{"_id": "j3", "jobTitle": "T", "companyName": "C"}"#).unwrap();
        let submission = ApplicationSubmission::new("u1", "Asha", &job);
        assert_eq!(submission.description, "N/A");

        let wire = serde_json::to_value(&submission).unwrap();
        assert_eq!(wire["userId"], "u1");
        assert_eq!(wire["userName"], "Asha");
        assert_eq!(wire["jobId"], "j3");
        assert!(wire["deadline"].is_null());
    }

    #[test]
    fn test_candidate_record_roundtrip_to_fields() {
        let raw = r#"{"_id": "c1", "name": "Asha", "skills": ["React", "Node"],
                      "location": "Pune", "education": "B.Tech", "stream": "CS"}"#;
        let record: CandidateRecord = serde_json::from_str(raw).unwrap();
        let fields = record.into_fields();
        assert_eq!(fields.full_name, "Asha");
        assert_eq!(fields.skills, parse_skills("Node, React"));
    }
}

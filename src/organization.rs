// src/organization.rs
//! Organization-side operations: post an opening, review applicants.

use tracing::info;

use crate::api::MarketplaceApi;
use crate::errors::{ClientError, EngagementError};
use crate::models::{ApplicantRow, InternshipDraft};
use crate::session::{Identity, Role};

#[derive(Debug)]
pub struct OrganizationDesk<A: MarketplaceApi> {
    api: A,
    identity: Identity,
}

impl<A: MarketplaceApi> OrganizationDesk<A> {
    /// Only an organization identity may open the desk.
    pub fn new(api: A, identity: Identity) -> Result<Self, ClientError> {
        if identity.role != Role::Organization {
            return Err(ClientError::Precondition(
                "Sign in as an organization to manage openings".to_string(),
            ));
        }
        Ok(Self { api, identity })
    }

    pub async fn post_opening(&self, draft: &InternshipDraft) -> Result<(), EngagementError> {
        validate(draft).map_err(EngagementError::from)?;

        self.api
            .post_internship(draft, &self.identity.actor_id)
            .await
            .map_err(EngagementError::from)?;

        info!(
            "Posted opening '{}' for company {}",
            draft.job_title, self.identity.actor_id
        );
        Ok(())
    }

    pub async fn applicants(&self) -> Result<Vec<ApplicantRow>, EngagementError> {
        self.api
            .company_applications(&self.identity.actor_id)
            .await
            .map_err(EngagementError::from)
    }
}

fn validate(draft: &InternshipDraft) -> Result<(), ClientError> {
    let missing = [
        ("company name", draft.company_name.trim().is_empty()),
        ("job title", draft.job_title.trim().is_empty()),
        ("job description", draft.job_description.trim().is_empty()),
        ("skills required", draft.skills_required.is_empty()),
        ("location", draft.location.trim().is_empty()),
    ];

    for (label, empty) in missing {
        if empty {
            return Err(ClientError::Validation(format!(
                "Opening field '{}' must not be empty",
                label
            )));
        }
    }
    Ok(())
}

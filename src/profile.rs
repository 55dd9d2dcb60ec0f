// src/profile.rs
//! Candidate profile store - single source of truth for "do we have a
//! usable profile".

use tracing::{info, warn};

use crate::api::MarketplaceApi;
use crate::errors::ClientError;
use crate::models::{ProfileFields, ProfileState};

pub struct ProfileStore {
    actor_id: String,
    state: ProfileState,
}

impl ProfileStore {
    pub fn new(actor_id: String) -> Self {
        Self {
            actor_id,
            state: ProfileState::default(),
        }
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    /// Fetch the stored profile for the actor. An absent profile is not an
    /// error; the store simply stays in `Draft`.
    pub async fn load(&mut self, api: &impl MarketplaceApi) -> Result<&ProfileState, ClientError> {
        match api.fetch_candidate(&self.actor_id).await? {
            Some(record) => {
                info!("Loaded profile {} for {}", record.id, self.actor_id);
                self.state = ProfileState::Persisted {
                    id: record.id.clone(),
                    fields: record.into_fields(),
                };
            }
            None => {
                info!("No stored profile for {}; starting from a draft", self.actor_id);
            }
        }
        Ok(&self.state)
    }

    /// Upsert the profile. Required fields are checked before any network
    /// traffic; on success the cache is replaced by the server's canonical
    /// representation via a re-read.
    pub async fn save(
        &mut self,
        api: &impl MarketplaceApi,
        fields: ProfileFields,
    ) -> Result<String, ClientError> {
        validate(&fields)?;

        let id = api.save_candidate(&fields, &self.actor_id).await?;

        // The save endpoint only returns the id; re-read so server-side
        // normalization lands in the cache. The save already succeeded, so a
        // failed re-read keeps the submitted fields rather than erroring.
        self.state = match api.fetch_candidate(&self.actor_id).await {
            Ok(Some(record)) => ProfileState::Persisted {
                id: record.id.clone(),
                fields: record.into_fields(),
            },
            Ok(None) => ProfileState::Persisted {
                id: id.clone(),
                fields,
            },
            Err(e) => {
                warn!("Canonical profile re-read failed after save: {}", e);
                ProfileState::Persisted {
                    id: id.clone(),
                    fields,
                }
            }
        };

        info!("Profile saved with id {}", id);
        Ok(id)
    }
}

fn validate(fields: &ProfileFields) -> Result<(), ClientError> {
    let missing = [
        ("full name", fields.full_name.trim().is_empty()),
        ("skills", fields.skills.is_empty()),
        ("location", fields.location.trim().is_empty()),
        ("education", fields.education.trim().is_empty()),
        ("stream", fields.stream.trim().is_empty()),
    ];

    for (label, empty) in missing {
        if empty {
            return Err(ClientError::Validation(format!(
                "Profile field '{}' must not be empty",
                label
            )));
        }
    }
    Ok(())
}

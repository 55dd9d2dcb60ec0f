// src/session.rs
//! Signed-in actor identity and its client-local persistence.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Which side of the marketplace the actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Organization,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Candidate => write!(f, "candidate"),
            Role::Organization => write!(f, "organization"),
        }
    }
}

/// The signed-in actor. Constructed once at login and threaded into the
/// components that need it; immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub actor_id: String,
    pub role: Role,
}

/// Persists the identity between invocations as a small JSON file.
/// Nothing else is stored locally; application state is rebuilt per session.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub async fn load(&self) -> Result<Option<Identity>> {
        if tokio::fs::metadata(&self.path).await.is_err() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;

        let identity: Identity = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt session file: {}", self.path.display()))?;

        Ok(Some(identity))
    }

    pub async fn save(&self, identity: &Identity) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(identity)?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;

        info!("Session stored for {} ({})", identity.actor_id, identity.role);
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        if tokio::fs::metadata(&self.path).await.is_ok() {
            tokio::fs::remove_file(&self.path)
                .await
                .with_context(|| format!("Failed to remove session file: {}", self.path.display()))?;
        }
        Ok(())
    }
}

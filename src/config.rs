// src/config.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, environment-driven with current-directory defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub session_path: PathBuf,
}

impl ClientConfig {
    pub fn load() -> Result<Self> {
        let api_base_url =
            std::env::var("INTERNMATCH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_seconds = match std::env::var("INTERNMATCH_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("INTERNMATCH_TIMEOUT_SECS must be a number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let session_path = match std::env::var("INTERNMATCH_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => {
                let current_dir =
                    std::env::current_dir().context("Failed to get current directory")?;
                current_dir.join(".internmatch").join("session.json")
            }
        };

        info!("API base URL: {}", api_base_url);
        Ok(Self {
            api_base_url,
            timeout_seconds,
            session_path,
        })
    }

    pub fn with_api_base_url(mut self, url: String) -> Self {
        self.api_base_url = url;
        self
    }
}

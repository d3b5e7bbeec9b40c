//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use crate::net::api::{DEFAULT_API_URL, normalize_base_url};

pub const API_URL_VAR: &str = "COURSEDESK_API_URL";
pub const SESSION_FILE_VAR: &str = "COURSEDESK_SESSION_FILE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("no session file configured and no data directory available; set COURSEDESK_SESSION_FILE")]
    NoSessionPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend API root, always ending in `/`.
    pub api_url: String,
    /// Where the bearer token is persisted.
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `COURSEDESK_API_URL`: default `http://localhost:8000/api/`
    /// - `COURSEDESK_SESSION_FILE`: default `<platform data dir>/token`
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is not an absolute http(s) URL or no
    /// session file location can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_parts(
            std::env::var(API_URL_VAR).ok().as_deref(),
            std::env::var(SESSION_FILE_VAR).ok().as_deref(),
        )
    }

    /// Build config from optional raw values, applying defaults.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_parts(api_url: Option<&str>, session_file: Option<&str>) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(api_url.unwrap_or(DEFAULT_API_URL))?;
        let session_file = match session_file.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => crate::session::default_token_path().ok_or(ConfigError::NoSessionPath)?,
        };
        Ok(Self { api_url, session_file })
    }
}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl { url: raw.to_owned(), reason };
    let url = reqwest::Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(normalize_base_url(url.as_str())),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

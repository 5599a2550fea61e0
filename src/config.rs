//! Credentials and tuning for talking to the start.gg API

use crate::error::{PreviewError, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.start.gg/gql/alpha";

/// A start.gg API bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(PreviewError::MissingCredentials("API token is empty".to_string()));
        }
        Ok(Self { token })
    }

    /// Read a token from a file containing only the token
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PreviewError::MissingCredentials(format!(
                "could not read {} ({}); put your start.gg API key in it or set STARTGG_TOKEN",
                path.display(),
                e
            ))
        })?;
        Self::new(content).map_err(|_| {
            PreviewError::MissingCredentials(format!("{} does not contain a token", path.display()))
        })
    }

    /// Use an explicit token when given, otherwise fall back to the token file
    pub fn resolve(token: Option<&str>, auth_file: &Path) -> Result<Self> {
        match token {
            Some(token) if !token.trim().is_empty() => Self::new(token),
            _ => Self::from_file(auth_file),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("token", &"[redacted]").finish()
    }
}

/// Everything the HTTP client needs
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: url::Url,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: &str, credentials: Credentials) -> Result<Self> {
        let api_url = url::Url::parse(api_url)
            .map_err(|e| PreviewError::Config(format!("invalid API URL {}: {}", api_url, e)))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(PreviewError::Config(format!(
                "API URL must be http(s), got {}",
                api_url.scheme()
            )));
        }
        Ok(Self {
            api_url,
            credentials,
            timeout: Duration::from_secs(30),
        })
    }
}

/// How hard to try when collecting a paginated entrant list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Full page walks attempted before giving up
    pub max_attempts: u32,
    pub initial_page_size: u32,
    /// Page size never shrinks below this
    pub min_page_size: u32,
    /// Pause before re-sending a request that failed transiently
    pub transient_backoff: Duration,
    /// Re-sends of a single request before the whole attempt is failed
    pub max_transient_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_page_size: 100,
            min_page_size: 1,
            transient_backoff: Duration::from_secs(4),
            max_transient_retries: 10,
        }
    }
}

impl RetryPolicy {
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(PreviewError::Config("at least one attempt is required".to_string()));
        }
        if self.min_page_size == 0 {
            return Err(PreviewError::Config("minimum page size must be positive".to_string()));
        }
        if self.initial_page_size < self.min_page_size {
            return Err(PreviewError::Config(format!(
                "page size {} is below the minimum of {}",
                self.initial_page_size, self.min_page_size
            )));
        }
        Ok(())
    }

    /// Page size for the attempt after one that failed at `page_size`
    pub fn shrink(&self, page_size: u32) -> u32 {
        (page_size / 2).max(self.min_page_size)
    }
}

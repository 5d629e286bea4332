//! Configuration management for appindex
//!
//! Settings are loaded from environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `APPINDEX_GITHUB_API_URL`: content API base - default: "https://api.github.com"
//! - `APPINDEX_GITHUB_TOKEN`: bearer token (falls back to `GITHUB_TOKEN`)
//! - `APPINDEX_GITHUB_CLIENT_ID` / `APPINDEX_GITHUB_CLIENT_SECRET`: OAuth app pair,
//!   used as basic auth when no token is configured
//! - `APPINDEX_USER_AGENT`: client identifier - default: "web-app-index"
//! - `APPINDEX_REQUEST_TIMEOUT`: timeout in seconds - default: "10"
//! - `APPINDEX_ADMIN_USERNAME`: GitHub login allowed to edit the catalog
//! - `APPINDEX_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use appindex::AppIndexConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppIndexConfig::default();
//! config.validate()?;
//!
//! let client = config.content_client()?;
//! # Ok(())
//! # }
//! ```

use crate::github::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::github::{Credentials, GitHubContentClient, GitHubError};
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    /// HTTP client could not be created
    #[error("Client initialization failed: {0}")]
    ClientInitError(#[from] GitHubError),
}

#[derive(Clone)]
pub struct AppIndexConfig {
    /// GitHub REST API base URL
    pub github_api_url: String,

    pub github_token: Option<String>,

    pub github_client_id: Option<String>,

    pub github_client_secret: Option<String>,

    /// Sent as `User-Agent` on every GitHub request
    pub user_agent: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    pub admin_username: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Default for AppIndexConfig {
    /// Loads from `APPINDEX_*` environment variables, falling back to defaults
    fn default() -> Self {
        let github_api_url = non_empty_var("APPINDEX_GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let github_token =
            non_empty_var("APPINDEX_GITHUB_TOKEN").or_else(|| non_empty_var("GITHUB_TOKEN"));

        let request_timeout_secs = env::var("APPINDEX_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let log_level = env::var("APPINDEX_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            github_api_url,
            github_token,
            github_client_id: non_empty_var("APPINDEX_GITHUB_CLIENT_ID"),
            github_client_secret: non_empty_var("APPINDEX_GITHUB_CLIENT_SECRET"),
            user_agent: non_empty_var("APPINDEX_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            request_timeout_secs,
            admin_username: non_empty_var("APPINDEX_ADMIN_USERNAME"),
            log_level,
        }
    }
}

impl AppIndexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(format!(
                "Request timeout cannot exceed {} seconds",
                MAX_REQUEST_TIMEOUT_SECS
            )));
        }

        if !self.github_api_url.starts_with("http://")
            && !self.github_api_url.starts_with("https://")
        {
            return Err(ConfigError::ParseError {
                field: "APPINDEX_GITHUB_API_URL".to_string(),
                error: format!("not an http(s) URL: {}", self.github_api_url),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Token first; a client id/secret pair only when both halves are set
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(token) = &self.github_token {
            return Some(Credentials::Token(token.clone()));
        }
        match (&self.github_client_id, &self.github_client_secret) {
            (Some(client_id), Some(client_secret)) => Some(Credentials::OAuthApp {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            }),
            _ => None,
        }
    }

    pub fn content_client(&self) -> Result<GitHubContentClient, ConfigError> {
        let client = GitHubContentClient::builder()
            .base_url(&self.github_api_url)
            .user_agent(&self.user_agent)
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .credentials(self.credentials())
            .build()?;
        Ok(client)
    }

    fn auth_mode(&self) -> &'static str {
        match self.credentials() {
            Some(Credentials::Token(_)) => "token",
            Some(Credentials::OAuthApp { .. }) => "oauth-app",
            None => "anonymous",
        }
    }
}

impl fmt::Debug for AppIndexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppIndexConfig")
            .field("github_api_url", &self.github_api_url)
            .field("auth", &self.auth_mode())
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("admin_username", &self.admin_username)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl fmt::Display for AppIndexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AppIndex Configuration:")?;
        writeln!(f, "  GitHub API: {}", self.github_api_url)?;
        writeln!(f, "  Auth: {}", self.auth_mode())?;
        writeln!(f, "  User Agent: {}", self.user_agent)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        if let Some(ref admin) = self.admin_username {
            writeln!(f, "  Admin: {}", admin)?;
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

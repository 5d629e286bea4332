//! GitHub content API client
//!
//! Fetches single repository files through `GET /repos/{owner}/{repo}/contents/{path}`.
//! Every failure mode (404, rate limiting, transport errors, malformed payloads) is
//! reported as a [`FetchOutcome`] variant rather than an error: a missing file is a
//! routine answer for detection, not an exceptional one.
//!
//! # Example
//!
//! ```no_run
//! use appindex::github::{Credentials, GitHubContentClient, RepoFileFetcher, RepoRef};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubContentClient::builder()
//!     .credentials(Some(Credentials::Token("ghp_example".to_string())))
//!     .build()?;
//!
//! let repo = RepoRef::new("rust-lang", "cargo");
//! if let Some(text) = client.fetch_file(&repo, "README.md").await.into_content() {
//!     println!("{} bytes", text.len());
//! }
//! # Ok(())
//! # }
//! ```

use super::RepoRef;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "web-app-index";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Errors raised while constructing a client. Fetching never errors.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// Optional credentials used to raise rate limits or reach private repositories
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Personal access or installation token, sent as a bearer token
    Token(String),
    /// OAuth application pair, sent as HTTP basic auth
    OAuthApp {
        client_id: String,
        client_secret: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Credentials::Token(***)"),
            Credentials::OAuthApp { client_id, .. } => f
                .debug_struct("Credentials::OAuthApp")
                .field("client_id", client_id)
                .field("client_secret", &"***")
                .finish(),
        }
    }
}

/// Result of fetching one repository file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Decoded file text
    Found(String),
    /// The API answered 404
    NotFound,
    /// Any other failure; the file is treated as absent
    Unavailable { reason: String },
}

impl FetchOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        FetchOutcome::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FetchOutcome::Found(_))
    }

    pub fn into_content(self) -> Option<String> {
        match self {
            FetchOutcome::Found(content) => Some(content),
            FetchOutcome::NotFound | FetchOutcome::Unavailable { .. } => None,
        }
    }
}

/// Source of raw repository file contents
#[async_trait]
pub trait RepoFileFetcher: Send + Sync {
    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> FetchOutcome;
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

/// Decodes a contents API payload. Base64 bodies arrive wrapped at 60 columns.
fn decode_content(payload: ContentResponse) -> FetchOutcome {
    match payload.encoding.as_deref() {
        Some("base64") => {
            let compact: String = payload
                .content
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();

            let bytes = match STANDARD.decode(compact.as_bytes()) {
                Ok(bytes) => bytes,
                Err(e) => return FetchOutcome::unavailable(format!("invalid base64: {}", e)),
            };

            match String::from_utf8(bytes) {
                Ok(text) => FetchOutcome::Found(text),
                Err(e) => FetchOutcome::unavailable(format!("content is not UTF-8: {}", e)),
            }
        }
        _ => FetchOutcome::Found(payload.content),
    }
}

/// HTTP implementation of [`RepoFileFetcher`] backed by the GitHub REST API
pub struct GitHubContentClient {
    base_url: String,
    user_agent: String,
    credentials: Option<Credentials>,
    http_client: Client,
}

impl GitHubContentClient {
    pub fn builder() -> GitHubContentClientBuilder {
        GitHubContentClientBuilder::default()
    }

    /// Client against the public API with default settings
    pub fn new(credentials: Option<Credentials>) -> Result<Self, GitHubError> {
        Self::builder().credentials(credentials).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn contents_url(&self, repo: &RepoRef, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url, repo.owner, repo.repo, path
        )
    }
}

#[async_trait]
impl RepoFileFetcher for GitHubContentClient {
    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> FetchOutcome {
        let url = self.contents_url(repo, path);

        let mut request = self
            .http_client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .header(reqwest::header::USER_AGENT, &self.user_agent);

        request = match &self.credentials {
            Some(Credentials::Token(token)) => request.bearer_auth(token),
            Some(Credentials::OAuthApp {
                client_id,
                client_secret,
            }) => request.basic_auth(client_id, Some(client_secret)),
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(repo = %repo, path, error = %e, "GitHub content request failed");
                return FetchOutcome::unavailable(format!("request failed: {}", e));
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(repo = %repo, path, "File not present");
            return FetchOutcome::NotFound;
        }
        if !status.is_success() {
            warn!(repo = %repo, path, status = %status, "GitHub content API returned error status");
            return FetchOutcome::unavailable(format!("status {}", status));
        }

        match response.json::<ContentResponse>().await {
            Ok(payload) => {
                let outcome = decode_content(payload);
                if let FetchOutcome::Unavailable { reason } = &outcome {
                    warn!(repo = %repo, path, reason = %reason, "Could not decode file content");
                } else {
                    debug!(repo = %repo, path, "Fetched file");
                }
                outcome
            }
            Err(e) => {
                warn!(repo = %repo, path, error = %e, "Malformed content API response");
                FetchOutcome::unavailable(format!("malformed response: {}", e))
            }
        }
    }
}

/// Builder for [`GitHubContentClient`]
#[derive(Debug, Clone)]
pub struct GitHubContentClientBuilder {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    credentials: Option<Credentials>,
}

impl Default for GitHubContentClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            credentials: None,
        }
    }
}

impl GitHubContentClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn build(self) -> Result<GitHubContentClient, GitHubError> {
        let http_client = Client::builder().timeout(self.timeout).build()?;

        Ok(GitHubContentClient {
            base_url: self.base_url,
            user_agent: self.user_agent,
            credentials: self.credentials,
            http_client,
        })
    }
}

//! GitHub repository access: URL parsing and file fetching

pub mod client;
mod mock;
mod repo_url;

pub use client::{
    Credentials, FetchOutcome, GitHubContentClient, GitHubContentClientBuilder, GitHubError,
    RepoFileFetcher,
};
pub use mock::MockFileFetcher;
pub use repo_url::RepoRef;

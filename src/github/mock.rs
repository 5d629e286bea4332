use super::client::{FetchOutcome, RepoFileFetcher};
use super::RepoRef;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`RepoFileFetcher`] serving a fixed set of files for every repository.
///
/// Paths without an entry answer [`FetchOutcome::NotFound`].
pub struct MockFileFetcher {
    files: HashMap<String, FetchOutcome>,
    requests: Mutex<Vec<(RepoRef, String)>>,
}

impl MockFileFetcher {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files
            .insert(path.into(), FetchOutcome::Found(content.into()));
        self
    }

    pub fn with_failure(mut self, path: impl Into<String>, reason: impl Into<String>) -> Self {
        self.files
            .insert(path.into(), FetchOutcome::unavailable(reason));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, path)| path.clone())
            .collect()
    }
}

impl Default for MockFileFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepoFileFetcher for MockFileFetcher {
    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> FetchOutcome {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((repo.clone(), path.to_string()));

        self.files
            .get(path)
            .cloned()
            .unwrap_or(FetchOutcome::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_registered_files() {
        let fetcher = MockFileFetcher::new()
            .with_file("go.mod", "module example.com/demo")
            .with_failure("README.md", "rate limited");
        let repo = RepoRef::new("acme", "widgets");

        assert!(fetcher.fetch_file(&repo, "go.mod").await.is_found());
        assert!(matches!(
            fetcher.fetch_file(&repo, "README.md").await,
            FetchOutcome::Unavailable { .. }
        ));
        assert_eq!(
            fetcher.fetch_file(&repo, "Cargo.toml").await,
            FetchOutcome::NotFound
        );
        assert_eq!(fetcher.request_count(), 3);
    }
}

//! Technology detection engine
//!
//! Fetches the fixed probe set for a repository concurrently, runs every
//! extractor, and merges their signals with first-wins precedence:
//! manifest dependencies, then marker files, then README keywords.
//!
//! # Example
//!
//! ```no_run
//! use appindex::detection::TechDetector;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let detector = TechDetector::github(None)?;
//! for tech in detector.detect("https://github.com/withastro/astro").await {
//!     println!("{}", tech);
//! }
//! # Ok(())
//! # }
//! ```

use super::merge::DetectionSet;
use super::signals::{manifest_signals, marker_file_signals, readme_signals, RepoSnapshot};
use super::tables::PROBED_FILES;
use super::types::DetectedTechnology;
use crate::github::{Credentials, GitHubContentClient, GitHubError, RepoFileFetcher, RepoRef};
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the detection pipeline against a pluggable file source
#[derive(Clone)]
pub struct TechDetector {
    fetcher: Arc<dyn RepoFileFetcher>,
}

impl TechDetector {
    pub fn new(fetcher: Arc<dyn RepoFileFetcher>) -> Self {
        Self { fetcher }
    }

    /// Detector backed by the public GitHub API
    pub fn github(credentials: Option<Credentials>) -> Result<Self, GitHubError> {
        Ok(Self::new(Arc::new(GitHubContentClient::new(credentials)?)))
    }

    /// Fetches every probed file concurrently. Failed fetches leave their slot empty.
    pub async fn fetch_snapshot(&self, repo: &RepoRef) -> RepoSnapshot {
        let fetches = PROBED_FILES
            .iter()
            .map(|path| async move { (*path, self.fetcher.fetch_file(repo, path).await) });

        let mut snapshot = RepoSnapshot::new();
        for (path, outcome) in join_all(fetches).await {
            snapshot.set(path, outcome.into_content());
        }
        snapshot
    }

    /// Detects technologies used by the repository behind `github_url`.
    ///
    /// URLs that do not point at a GitHub repository yield an empty list.
    pub async fn detect(&self, github_url: &str) -> Vec<DetectedTechnology> {
        let Some(repo) = RepoRef::parse(github_url) else {
            debug!(url = github_url, "Not a GitHub repository URL, skipping detection");
            return Vec::new();
        };

        let start = Instant::now();
        let snapshot = self.fetch_snapshot(&repo).await;
        let detected = detect_from_snapshot(&snapshot);

        info!(
            repo = %repo,
            files = ?snapshot.present_files(),
            detected = detected.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Technology detection finished"
        );

        detected
    }
}

/// Pure merge step over already-fetched files
pub fn detect_from_snapshot(snapshot: &RepoSnapshot) -> Vec<DetectedTechnology> {
    let mut set = DetectionSet::new();

    if let Some(manifest) = snapshot.package_json.as_deref() {
        set.extend(manifest_signals(manifest));
    }

    set.extend(marker_file_signals(snapshot));

    if let Some(readme) = snapshot.readme.as_deref() {
        set.extend(readme_signals(readme));
    }

    set.into_vec()
}

/// One-shot detection against the public GitHub API.
///
/// A client that cannot be constructed is treated like an unreachable API.
pub async fn detect_tech_from_github(
    github_url: &str,
    credentials: Option<Credentials>,
) -> Vec<DetectedTechnology> {
    match TechDetector::github(credentials) {
        Ok(detector) => detector.detect(github_url).await,
        Err(e) => {
            warn!(error = %e, "Cannot create GitHub client, skipping detection");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::tables::DEV_TOOLING_ROLE;
    use crate::github::MockFileFetcher;
    use std::collections::HashSet;

    const REPO_URL: &str = "https://github.com/acme/widgets";

    fn as_set(detected: Vec<DetectedTechnology>) -> HashSet<(String, String)> {
        detected.into_iter().map(|t| (t.name, t.role)).collect()
    }

    fn pairs(items: &[(&str, &str)]) -> HashSet<(String, String)> {
        items
            .iter()
            .map(|(n, r)| (n.to_string(), r.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_react_with_dev_eslint() {
        let fetcher = MockFileFetcher::new().with_file(
            "package.json",
            r#"{"dependencies":{"react":"^18"},"devDependencies":{"eslint":"^8"}}"#,
        );
        let detector = TechDetector::new(Arc::new(fetcher));

        let detected = detector.detect(REPO_URL).await;
        assert_eq!(
            as_set(detected),
            pairs(&[
                ("React", "UIレンダリング"),
                ("ESLint", DEV_TOOLING_ROLE),
                ("Node.js", "ランタイム"),
                ("JavaScript", "言語"),
            ])
        );
    }

    #[tokio::test]
    async fn test_readme_only() {
        let fetcher = MockFileFetcher::new().with_file("README.md", "built with Go and Docker");
        let detector = TechDetector::new(Arc::new(fetcher));

        assert_eq!(
            as_set(detector.detect(REPO_URL).await),
            pairs(&[("Go", "バックエンド言語"), ("Docker", "コンテナ")])
        );
    }

    #[tokio::test]
    async fn test_manifest_role_beats_readme_role() {
        let fetcher = MockFileFetcher::new()
            .with_file("package.json", r#"{"devDependencies":{"react":"^18"}}"#)
            .with_file("README.md", "A React app");
        let detector = TechDetector::new(Arc::new(fetcher));

        let detected = detector.detect(REPO_URL).await;
        let react = detected.iter().find(|t| t.name == "React").unwrap();
        assert_eq!(react.role, DEV_TOOLING_ROLE);
    }

    #[tokio::test]
    async fn test_runtime_client_package_beats_dev_cli_package() {
        let fetcher = MockFileFetcher::new().with_file(
            "package.json",
            r#"{"dependencies":{"@prisma/client":"5","react-dom":"18"},
                "devDependencies":{"prisma":"5","react":"18"}}"#,
        );
        let detector = TechDetector::new(Arc::new(fetcher));

        assert_eq!(
            as_set(detector.detect(REPO_URL).await),
            pairs(&[
                ("React", "UIレンダリング"),
                ("Prisma", "ORM"),
                ("Node.js", "ランタイム"),
                ("JavaScript", "言語"),
            ])
        );
    }

    #[tokio::test]
    async fn test_failed_manifest_does_not_void_readme() {
        let fetcher = MockFileFetcher::new()
            .with_failure("package.json", "502 Bad Gateway")
            .with_file("README.md", "Uses Redis for caching");
        let detector = TechDetector::new(Arc::new(fetcher));

        assert_eq!(
            as_set(detector.detect(REPO_URL).await),
            pairs(&[("Redis", "キャッシュ")])
        );
    }

    #[tokio::test]
    async fn test_malformed_manifest_other_steps_still_run() {
        let fetcher = MockFileFetcher::new()
            .with_file("package.json", "{ not json")
            .with_file("Dockerfile", "FROM node:20");
        let detector = TechDetector::new(Arc::new(fetcher));

        assert_eq!(
            as_set(detector.detect(REPO_URL).await),
            pairs(&[("Docker", "コンテナ")])
        );
    }

    #[tokio::test]
    async fn test_empty_repository() {
        let fetcher = Arc::new(MockFileFetcher::new());
        let detector = TechDetector::new(fetcher.clone());

        assert!(detector.detect(REPO_URL).await.is_empty());
        assert_eq!(fetcher.request_count(), PROBED_FILES.len());

        let mut requested = fetcher.requested_paths();
        requested.sort();
        let mut expected: Vec<String> = PROBED_FILES.iter().map(|p| p.to_string()).collect();
        expected.sort();
        assert_eq!(requested, expected);
    }

    #[tokio::test]
    async fn test_non_github_url_makes_no_requests() {
        let fetcher = Arc::new(MockFileFetcher::new().with_file("README.md", "docker"));
        let detector = TechDetector::new(fetcher.clone());

        assert!(detector.detect("https://gitlab.com/acme/widgets").await.is_empty());
        assert_eq!(fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn test_detection_is_idempotent() {
        let fetcher = MockFileFetcher::new()
            .with_file("package.json", r#"{"dependencies":{"next":"14","react":"18"}}"#)
            .with_file("requirements.txt", "fastapi\n")
            .with_file("README.md", "Deployed to Vercel, data in PostgreSQL");
        let detector = TechDetector::new(Arc::new(fetcher));

        let first = as_set(detector.detect(REPO_URL).await);
        let second = as_set(detector.detect(REPO_URL).await);
        assert_eq!(first, second);
    }

    #[test]
    fn test_marker_file_beats_readme() {
        let snapshot = RepoSnapshot::new()
            .with_file("requirements.txt", "django\n")
            .with_file("README.md", "python, django, docker");

        let detected = detect_from_snapshot(&snapshot);
        let names: Vec<&str> = detected.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Python", "Django", "Docker"]);
    }
}

//! appindex - technology detection for a personal web-app catalog
//!
//! Given a GitHub repository URL, appindex reads a handful of well-known files
//! through the GitHub content API and infers which technologies the project
//! uses, each with a short usage role. The catalog layer matches those
//! detections against registered technologies and backfills roles on an
//! app's tech-stack annotations.
//!
//! # Core Concepts
//!
//! - **Detection**: manifest dependencies, marker files and README keywords,
//!   merged so the first source to name a technology decides its role
//! - **Catalog matching**: case-insensitive name match against the tech catalog
//! - **Role reconciliation**: role-less annotations take the detected role;
//!   explicit roles are never replaced
//!
//! # Example Usage
//!
//! ```no_run
//! use appindex::{detect_tech_from_github, match_catalog, TechCatalogEntry, TechCategory};
//!
//! # async fn example() {
//! let detected = detect_tech_from_github("https://github.com/octocat/hello-world", None).await;
//!
//! let catalog = vec![TechCatalogEntry::new(1, "React", "react", TechCategory::Frontend)];
//! for usage in match_catalog(&detected, &catalog) {
//!     println!("{} {:?}", usage.tech.name, usage.usage_role);
//! }
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`github`]: content API client and repository URL parsing
//! - [`detection`]: signal extraction and merging
//! - [`catalog`]: catalog model, store contract, matching and reconciliation
//! - [`api`]: framework-agnostic endpoint handlers
//! - [`cli`]: the `appindex` command-line interface

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod detection;
pub mod github;
pub mod util;

pub use api::{ApiError, ApiResponse, AppIndexApi, Session};
pub use catalog::{
    apply_detected_roles, match_catalog, App, AppInput, AppWithTech, CatalogService,
    CatalogStore, InMemoryCatalog, RoleReconciler, StoreError, TechCatalogEntry, TechCategory,
    TechStackAnnotation, TechUsage,
};
pub use config::{AppIndexConfig, ConfigError};
pub use detection::{
    detect_from_snapshot, detect_tech_from_github, DetectedTechnology, TechDetector,
};
pub use github::{Credentials, FetchOutcome, GitHubContentClient, RepoFileFetcher, RepoRef};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_appindex() {
        assert_eq!(NAME, "appindex");
    }
}

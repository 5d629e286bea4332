//! Backfills missing usage roles from repository detection
//!
//! Explicit roles chosen by an admin are never replaced; only role-less
//! annotations are eligible. Annotations whose technology was not detected
//! stay role-less.

use super::matcher::match_catalog;
use super::store::{CatalogStore, StoreError};
use super::types::{TechCatalogEntry, TechStackAnnotation};
use crate::detection::{DetectedTechnology, TechDetector};
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone)]
pub struct RoleReconciler {
    detector: TechDetector,
}

impl RoleReconciler {
    pub fn new(detector: TechDetector) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &TechDetector {
        &self.detector
    }

    /// Fills role-less annotations with detected roles.
    ///
    /// Returns `entries` unchanged when there is nothing to fill, no GitHub URL,
    /// or detection finds nothing. The catalog is only read when needed.
    pub async fn reconcile(
        &self,
        github_url: Option<&str>,
        entries: Vec<TechStackAnnotation>,
        store: &dyn CatalogStore,
    ) -> Result<Vec<TechStackAnnotation>, StoreError> {
        if entries.is_empty() || entries.iter().all(TechStackAnnotation::has_role) {
            return Ok(entries);
        }

        let Some(github_url) = github_url.filter(|url| !url.trim().is_empty()) else {
            return Ok(entries);
        };

        let detected = self.detector.detect(github_url).await;
        if detected.is_empty() {
            debug!(url = github_url, "Nothing detected, keeping annotations as-is");
            return Ok(entries);
        }

        let catalog = store.get_tech_stacks().await?;
        Ok(apply_detected_roles(entries, &detected, &catalog))
    }
}

/// Pure fill step: role-less entries take the detected role for their id, if any
pub fn apply_detected_roles(
    entries: Vec<TechStackAnnotation>,
    detected: &[DetectedTechnology],
    catalog: &[TechCatalogEntry],
) -> Vec<TechStackAnnotation> {
    let roles: HashMap<i64, String> = match_catalog(detected, catalog)
        .into_iter()
        .filter_map(|usage| usage.usage_role.map(|role| (usage.tech.id, role)))
        .collect();

    entries
        .into_iter()
        .map(|entry| {
            if entry.has_role() {
                entry
            } else {
                TechStackAnnotation {
                    id: entry.id,
                    usage_role: roles.get(&entry.id).cloned(),
                }
            }
        })
        .collect()
}

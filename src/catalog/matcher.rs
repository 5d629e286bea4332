use super::types::{TechCatalogEntry, TechUsage};
use crate::detection::DetectedTechnology;
use tracing::debug;

/// Maps detections onto catalog entries by case-insensitive name.
///
/// Detections without a catalog counterpart are dropped. The detected role is
/// attached as `usage_role` on a copy; catalog entries are never modified.
pub fn match_catalog(
    detected: &[DetectedTechnology],
    catalog: &[TechCatalogEntry],
) -> Vec<TechUsage> {
    detected
        .iter()
        .filter_map(|tech| {
            let wanted = tech.name.to_lowercase();
            match catalog.iter().find(|entry| entry.name.to_lowercase() == wanted) {
                Some(entry) => Some(TechUsage {
                    tech: entry.clone(),
                    usage_role: tech.has_role().then(|| tech.role.clone()),
                }),
                None => {
                    debug!(name = %tech.name, "Detected technology has no catalog entry");
                    None
                }
            }
        })
        .collect()
}

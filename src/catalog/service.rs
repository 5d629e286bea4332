//! Catalog create/update path with role backfilling

use super::matcher::match_catalog;
use super::reconcile::RoleReconciler;
use super::store::{CatalogStore, StoreError};
use super::types::{AppInput, AppOrder, AppWithTech, TechCatalogEntry, TechUsage};
use crate::detection::TechDetector;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    reconciler: RoleReconciler,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, detector: TechDetector) -> Self {
        Self {
            store,
            reconciler: RoleReconciler::new(detector),
        }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    pub async fn list_apps(&self) -> Result<Vec<AppWithTech>, StoreError> {
        self.store.get_apps().await
    }

    pub async fn get_app(&self, id: i64) -> Result<Option<AppWithTech>, StoreError> {
        self.store.get_app(id).await
    }

    pub async fn list_tech(&self) -> Result<Vec<TechCatalogEntry>, StoreError> {
        self.store.get_tech_stacks().await
    }

    /// Detection preview: detected technologies that exist in the catalog
    pub async fn detect_catalog_tech(
        &self,
        github_url: &str,
    ) -> Result<Vec<TechUsage>, StoreError> {
        let detected = self.reconciler.detector().detect(github_url).await;
        if detected.is_empty() {
            return Ok(Vec::new());
        }
        let catalog = self.store.get_tech_stacks().await?;
        Ok(match_catalog(&detected, &catalog))
    }

    pub async fn create_app(&self, user_id: i64, input: &AppInput) -> Result<i64, StoreError> {
        if input.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(StoreError::MissingField("title"));
        }

        let entries = input.resolved_tech_entries().unwrap_or_default();
        let entries = self
            .reconciler
            .reconcile(input.github_url.as_deref(), entries, self.store.as_ref())
            .await?;

        let id = self.store.create_app(user_id, input, &entries).await?;
        info!(app_id = id, tech = entries.len(), "Created app");
        Ok(id)
    }

    pub async fn update_app(&self, id: i64, input: &AppInput) -> Result<(), StoreError> {
        let entries = match input.resolved_tech_entries() {
            Some(entries) => Some(
                self.reconciler
                    .reconcile(input.github_url.as_deref(), entries, self.store.as_ref())
                    .await?,
            ),
            None => None,
        };

        self.store.update_app(id, input, entries.as_deref()).await?;
        info!(app_id = id, "Updated app");
        Ok(())
    }

    pub async fn delete_app(&self, id: i64) -> Result<(), StoreError> {
        self.store.delete_app(id).await?;
        info!(app_id = id, "Deleted app");
        Ok(())
    }

    pub async fn reorder_apps(&self, orders: &[AppOrder]) -> Result<(), StoreError> {
        self.store.reorder_apps(orders).await
    }
}

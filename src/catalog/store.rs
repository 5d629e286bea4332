//! Catalog persistence boundary
//!
//! [`CatalogStore`] is the contract the rest of the crate relies on. The
//! production backend lives outside this crate; [`InMemoryCatalog`] backs the
//! CLI and the test-suite.

use super::types::{
    App, AppInput, AppOrder, AppWithTech, TechCatalogEntry, TechStackAnnotation, TechUsage,
    DEFAULT_THUMBNAIL_TYPE,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("App not found: {0}")]
    AppNotFound(i64),

    #[error("Unknown technology id: {0}")]
    UnknownTech(i64),

    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_apps(&self) -> Result<Vec<AppWithTech>, StoreError>;

    async fn get_app(&self, id: i64) -> Result<Option<AppWithTech>, StoreError>;

    async fn create_app(
        &self,
        user_id: i64,
        input: &AppInput,
        tech: &[TechStackAnnotation],
    ) -> Result<i64, StoreError>;

    /// `tech: None` leaves the app's technology list untouched
    async fn update_app(
        &self,
        id: i64,
        input: &AppInput,
        tech: Option<&[TechStackAnnotation]>,
    ) -> Result<(), StoreError>;

    async fn delete_app(&self, id: i64) -> Result<(), StoreError>;

    async fn reorder_apps(&self, orders: &[AppOrder]) -> Result<(), StoreError>;

    async fn get_tech_stacks(&self) -> Result<Vec<TechCatalogEntry>, StoreError>;
}

#[derive(Debug, Default)]
struct CatalogState {
    apps: BTreeMap<i64, App>,
    app_tech: HashMap<i64, Vec<TechStackAnnotation>>,
    tech: Vec<TechCatalogEntry>,
    next_app_id: i64,
}

impl CatalogState {
    fn check_tech(&self, entries: &[TechStackAnnotation]) -> Result<(), StoreError> {
        for entry in entries {
            if !self.tech.iter().any(|t| t.id == entry.id) {
                return Err(StoreError::UnknownTech(entry.id));
            }
        }
        Ok(())
    }

    fn with_tech(&self, app: &App) -> AppWithTech {
        let tech_stacks = self
            .app_tech
            .get(&app.id)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        self.tech.iter().find(|t| t.id == entry.id).map(|tech| TechUsage {
                            tech: tech.clone(),
                            usage_role: entry.usage_role.clone().filter(|r| !r.is_empty()),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        AppWithTech {
            app: app.clone(),
            tech_stacks,
        }
    }
}

/// Process-local [`CatalogStore`]
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tech_stacks(tech: Vec<TechCatalogEntry>) -> Self {
        Self {
            state: RwLock::new(CatalogState {
                tech,
                ..Default::default()
            }),
        }
    }

    pub async fn add_tech_stack(&self, entry: TechCatalogEntry) {
        self.state.write().await.tech.push(entry);
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn get_apps(&self) -> Result<Vec<AppWithTech>, StoreError> {
        let state = self.state.read().await;

        let mut apps: Vec<&App> = state.apps.values().collect();
        apps.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(b.updated_at.cmp(&a.updated_at))
                .then(b.id.cmp(&a.id))
        });

        Ok(apps.into_iter().map(|app| state.with_tech(app)).collect())
    }

    async fn get_app(&self, id: i64) -> Result<Option<AppWithTech>, StoreError> {
        let state = self.state.read().await;
        Ok(state.apps.get(&id).map(|app| state.with_tech(app)))
    }

    async fn create_app(
        &self,
        user_id: i64,
        input: &AppInput,
        tech: &[TechStackAnnotation],
    ) -> Result<i64, StoreError> {
        let title = input
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(StoreError::MissingField("title"))?;

        let mut state = self.state.write().await;
        state.check_tech(tech)?;

        state.next_app_id += 1;
        let id = state.next_app_id;
        let now = Utc::now();

        state.apps.insert(
            id,
            App {
                id,
                user_id,
                title,
                description: input.description.clone(),
                site_url: input.site_url.clone(),
                github_url: input.github_url.clone(),
                thumbnail_url: input.thumbnail_url.clone(),
                thumbnail_type: input
                    .thumbnail_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_THUMBNAIL_TYPE.to_string()),
                display_order: 0,
                created_at: now,
                updated_at: now,
            },
        );
        if !tech.is_empty() {
            state.app_tech.insert(id, tech.to_vec());
        }

        Ok(id)
    }

    async fn update_app(
        &self,
        id: i64,
        input: &AppInput,
        tech: Option<&[TechStackAnnotation]>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.apps.contains_key(&id) {
            return Err(StoreError::AppNotFound(id));
        }
        if let Some(tech) = tech {
            state.check_tech(tech)?;
        }

        if let Some(app) = state.apps.get_mut(&id) {
            let mut touched = false;
            let mut apply = |field: &mut Option<String>, value: &Option<String>| {
                if let Some(value) = value {
                    *field = Some(value.clone());
                    touched = true;
                }
            };
            apply(&mut app.description, &input.description);
            apply(&mut app.site_url, &input.site_url);
            apply(&mut app.github_url, &input.github_url);
            apply(&mut app.thumbnail_url, &input.thumbnail_url);

            if let Some(title) = &input.title {
                app.title = title.clone();
                touched = true;
            }
            if let Some(thumbnail_type) = &input.thumbnail_type {
                app.thumbnail_type = thumbnail_type.clone();
                touched = true;
            }
            if touched {
                app.updated_at = Utc::now();
            }
        }

        if let Some(tech) = tech {
            if tech.is_empty() {
                state.app_tech.remove(&id);
            } else {
                state.app_tech.insert(id, tech.to_vec());
            }
        }

        Ok(())
    }

    async fn delete_app(&self, id: i64) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.app_tech.remove(&id);
        state.apps.remove(&id);
        Ok(())
    }

    async fn reorder_apps(&self, orders: &[AppOrder]) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        for order in orders {
            if let Some(app) = state.apps.get_mut(&order.id) {
                app.display_order = order.display_order;
            }
        }
        Ok(())
    }

    async fn get_tech_stacks(&self) -> Result<Vec<TechCatalogEntry>, StoreError> {
        let state = self.state.read().await;
        let mut tech = state.tech.clone();
        tech.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(tech)
    }
}

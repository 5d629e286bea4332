//! App catalog: data model, persistence contract, and the tech-annotation path

mod matcher;
mod reconcile;
mod service;
mod store;
mod types;

pub use matcher::match_catalog;
pub use reconcile::{apply_detected_roles, RoleReconciler};
pub use service::CatalogService;
pub use store::{CatalogStore, InMemoryCatalog, StoreError};
pub use types::{
    App, AppInput, AppOrder, AppWithTech, TechCatalogEntry, TechCategory, TechStackAnnotation,
    TechUsage, DEFAULT_THUMBNAIL_TYPE,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed technology categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechCategory {
    Frontend,
    Backend,
    Database,
    Infrastructure,
    Library,
    #[serde(other)]
    Other,
}

impl TechCategory {
    pub fn all_variants() -> &'static [Self] {
        &[
            Self::Frontend,
            Self::Backend,
            Self::Database,
            Self::Infrastructure,
            Self::Library,
            Self::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Database => "database",
            Self::Infrastructure => "infrastructure",
            Self::Library => "library",
            Self::Other => "other",
        }
    }

    /// Display label shown in the catalog UI
    pub fn label(&self) -> &'static str {
        match self {
            Self::Frontend => "フロントエンド",
            Self::Backend => "バックエンド",
            Self::Database => "データベース",
            Self::Infrastructure => "インフラ",
            Self::Library => "ライブラリ",
            Self::Other => "その他",
        }
    }
}

impl fmt::Display for TechCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical registered technology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechCatalogEntry {
    pub id: i64,
    pub name: String,
    /// Simple Icons slug
    pub slug: String,
    pub category: TechCategory,
    #[serde(default)]
    pub color: Option<String>,
}

impl TechCatalogEntry {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        slug: impl Into<String>,
        category: TechCategory,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            category,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn icon_url(&self) -> String {
        match &self.color {
            Some(color) => format!("https://cdn.simpleicons.org/{}/{}", self.slug, color),
            None => format!("https://cdn.simpleicons.org/{}", self.slug),
        }
    }
}

/// Technology reference attached to an app, optionally with how the app uses it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStackAnnotation {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_role: Option<String>,
}

impl TechStackAnnotation {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            usage_role: None,
        }
    }

    pub fn with_role(id: i64, role: impl Into<String>) -> Self {
        Self {
            id,
            usage_role: Some(role.into()),
        }
    }

    /// An empty string counts as no role
    pub fn has_role(&self) -> bool {
        self.usage_role.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// Catalog entry together with the role it plays in a particular app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechUsage {
    #[serde(flatten)]
    pub tech: TechCatalogEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub site_url: Option<String>,
    pub github_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub thumbnail_type: String,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppWithTech {
    #[serde(flatten)]
    pub app: App,
    pub tech_stacks: Vec<TechUsage>,
}

pub const DEFAULT_THUMBNAIL_TYPE: &str = "auto";

/// Create/update payload. Absent fields are left untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub thumbnail_type: Option<String>,
    /// Legacy form: plain technology ids
    #[serde(default)]
    pub tech_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub tech_entries: Option<Vec<TechStackAnnotation>>,
}

impl AppInput {
    /// Technology list carried by the payload; `tech_entries` supersedes `tech_ids`.
    ///
    /// `None` means the payload does not mention technologies at all.
    pub fn resolved_tech_entries(&self) -> Option<Vec<TechStackAnnotation>> {
        if let Some(entries) = &self.tech_entries {
            return Some(entries.clone());
        }
        self.tech_ids
            .as_ref()
            .map(|ids| ids.iter().copied().map(TechStackAnnotation::new).collect())
    }
}

/// New position for one app in the catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppOrder {
    pub id: i64,
    pub display_order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_serde() {
        assert_eq!(
            serde_json::to_string(&TechCategory::Infrastructure).unwrap(),
            "\"infrastructure\""
        );
        let parsed: TechCategory = serde_json::from_str("\"database\"").unwrap();
        assert_eq!(parsed, TechCategory::Database);

        let unknown: TechCategory = serde_json::from_str("\"quantum\"").unwrap();
        assert_eq!(unknown, TechCategory::Other);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(TechCategory::Frontend.label(), "フロントエンド");
        assert_eq!(TechCategory::Other.label(), "その他");
        assert_eq!(TechCategory::all_variants().len(), 6);
    }

    #[test]
    fn test_icon_url() {
        let react = TechCatalogEntry::new(1, "React", "react", TechCategory::Frontend);
        assert_eq!(react.icon_url(), "https://cdn.simpleicons.org/react");
        assert_eq!(
            react.with_color("61DAFB").icon_url(),
            "https://cdn.simpleicons.org/react/61DAFB"
        );
    }

    #[test]
    fn test_annotation_has_role() {
        assert!(!TechStackAnnotation::new(1).has_role());
        assert!(!TechStackAnnotation::with_role(1, "").has_role());
        assert!(TechStackAnnotation::with_role(1, "APIサーバー").has_role());
    }

    #[test]
    fn test_annotation_omits_missing_role() {
        let value = serde_json::to_value(TechStackAnnotation::new(7)).unwrap();
        assert_eq!(value, json!({"id": 7}));
    }

    #[test]
    fn test_tech_usage_flattens_entry() {
        let usage = TechUsage {
            tech: TechCatalogEntry::new(3, "Go", "go", TechCategory::Backend),
            usage_role: Some("バックエンド言語".to_string()),
        };
        let value = serde_json::to_value(&usage).unwrap();
        assert_eq!(value["name"], "Go");
        assert_eq!(value["category"], "backend");
        assert_eq!(value["usage_role"], "バックエンド言語");
    }

    #[test]
    fn test_tech_entries_supersede_tech_ids() {
        let input: AppInput = serde_json::from_value(json!({
            "title": "Demo",
            "tech_ids": [1, 2],
            "tech_entries": [{"id": 3, "usage_role": "ORM"}]
        }))
        .unwrap();

        assert_eq!(
            input.resolved_tech_entries(),
            Some(vec![TechStackAnnotation::with_role(3, "ORM")])
        );
    }

    #[test]
    fn test_tech_ids_become_roleless_entries() {
        let input = AppInput {
            tech_ids: Some(vec![4, 5]),
            ..Default::default()
        };
        assert_eq!(
            input.resolved_tech_entries(),
            Some(vec![TechStackAnnotation::new(4), TechStackAnnotation::new(5)])
        );
        assert_eq!(AppInput::default().resolved_tech_entries(), None);
    }
}

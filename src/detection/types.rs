use serde::{Deserialize, Serialize};
use std::fmt;

/// A technology inferred for one repository and how it is used there
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectedTechnology {
    pub name: String,
    /// Empty when no role signal applies
    pub role: String,
}

impl DetectedTechnology {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }

    pub fn has_role(&self) -> bool {
        !self.role.is_empty()
    }
}

impl fmt::Display for DetectedTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_role() {
            write!(f, "{} ({})", self.name, self.role)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Where a detection signal came from, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    Manifest,
    MarkerFile,
    Readme,
}

/// One `(technology, role)` pair produced by an extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub name: &'static str,
    pub role: &'static str,
    pub source: SignalSource,
}

impl Signal {
    pub fn new(name: &'static str, role: &'static str, source: SignalSource) -> Self {
        Self { name, role, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_and_without_role() {
        assert_eq!(
            DetectedTechnology::new("Go", "バックエンド言語").to_string(),
            "Go (バックエンド言語)"
        );
        assert_eq!(DetectedTechnology::new("Go", "").to_string(), "Go");
    }

    #[test]
    fn test_serialization_shape() {
        let json =
            serde_json::to_value(DetectedTechnology::new("React", "UIレンダリング")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "React", "role": "UIレンダリング"}));
    }

    #[test]
    fn test_source_precedence_order() {
        assert!(SignalSource::Manifest < SignalSource::MarkerFile);
        assert!(SignalSource::MarkerFile < SignalSource::Readme);
    }
}

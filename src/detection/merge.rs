use super::types::{DetectedTechnology, Signal, SignalSource};
use std::collections::HashMap;
use tracing::trace;

/// Insertion-ordered technology → role map where the first role recorded wins.
///
/// Extraction phases are fed in precedence order (manifest, marker files, README),
/// so a later, weaker signal can never replace an earlier one.
#[derive(Debug, Clone, Default)]
pub struct DetectionSet {
    entries: Vec<DetectedTechnology>,
    index: HashMap<String, usize>,
    sources: HashMap<String, SignalSource>,
}

impl DetectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` unless already present. Returns whether it was inserted.
    pub fn insert(&mut self, name: &str, role: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(DetectedTechnology::new(name, role));
        true
    }

    /// Inserts each signal in order, remembering which source decided the role
    pub fn extend(&mut self, signals: impl IntoIterator<Item = Signal>) {
        for signal in signals {
            if self.insert(signal.name, signal.role) {
                self.sources.insert(signal.name.to_string(), signal.source);
            } else {
                trace!(
                    tech = signal.name,
                    source = ?signal.source,
                    "Signal shadowed by earlier source"
                );
            }
        }
    }

    /// Source of the signal that decided `name`; `None` for direct inserts
    pub fn source_of(&self, name: &str) -> Option<SignalSource> {
        self.sources.get(name).copied()
    }

    pub fn role_of(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&i| self.entries[i].role.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<DetectedTechnology> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_role_wins() {
        let mut set = DetectionSet::new();
        assert!(set.insert("React", "ビルド・開発ツール"));
        assert!(!set.insert("React", "UIレンダリング"));

        assert_eq!(set.role_of("React"), Some("ビルド・開発ツール"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut set = DetectionSet::new();
        set.extend(vec![
            Signal::new("Node.js", "ランタイム", SignalSource::Manifest),
            Signal::new("Go", "バックエンド言語", SignalSource::MarkerFile),
            Signal::new("Node.js", "", SignalSource::Readme),
            Signal::new("Docker", "コンテナ", SignalSource::Readme),
        ]);

        let names: Vec<String> = set.into_vec().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Node.js", "Go", "Docker"]);
    }

    #[test]
    fn test_source_of_reports_deciding_phase() {
        let mut set = DetectionSet::new();
        set.extend(vec![Signal::new("Go", "バックエンド言語", SignalSource::MarkerFile)]);
        set.extend(vec![
            Signal::new("Go", "バックエンド言語", SignalSource::Readme),
            Signal::new("Docker", "コンテナ", SignalSource::Readme),
        ]);
        set.insert("Rust", "バックエンド言語");

        assert_eq!(set.source_of("Go"), Some(SignalSource::MarkerFile));
        assert_eq!(set.source_of("Docker"), Some(SignalSource::Readme));
        assert_eq!(set.source_of("Rust"), None);
        assert_eq!(set.source_of("React"), None);
    }

    #[test]
    fn test_empty_set() {
        let set = DetectionSet::new();
        assert!(set.is_empty());
        assert!(!set.contains("React"));
        assert_eq!(set.role_of("React"), None);
    }
}

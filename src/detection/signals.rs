//! Signal extractors
//!
//! Each extractor reads one piece of a [`RepoSnapshot`] and emits zero or more
//! [`Signal`]s. Extractors are independent of each other; precedence between
//! them is applied later by [`DetectionSet`](super::DetectionSet).

use super::tables::{
    self, DEV_TOOLING_ROLE, MANIFEST_PLATFORM, MARKER_FILES, PACKAGE_TABLE, PYTHON_FRAMEWORKS,
    README_KEYWORDS, README_WORD_KEYWORDS,
};
use super::types::{Signal, SignalSource};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

/// Contents of the probed files for one detection run. `None` means absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSnapshot {
    pub package_json: Option<String>,
    pub requirements_txt: Option<String>,
    pub go_mod: Option<String>,
    pub cargo_toml: Option<String>,
    pub readme: Option<String>,
    pub dockerfile: Option<String>,
    pub wrangler_toml: Option<String>,
}

impl RepoSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `content` under the slot for a probed path; unknown paths are ignored.
    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.set(path, Some(content.into()));
        self
    }

    pub fn set(&mut self, path: &str, content: Option<String>) {
        if let Some(slot) = self.slot_mut(path) {
            *slot = content;
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        match path {
            tables::PACKAGE_MANIFEST => self.package_json.as_deref(),
            tables::PYTHON_REQUIREMENTS => self.requirements_txt.as_deref(),
            tables::GO_MODULE => self.go_mod.as_deref(),
            tables::CARGO_MANIFEST => self.cargo_toml.as_deref(),
            tables::README => self.readme.as_deref(),
            tables::DOCKERFILE => self.dockerfile.as_deref(),
            tables::WRANGLER_CONFIG => self.wrangler_toml.as_deref(),
            _ => None,
        }
    }

    pub fn present_files(&self) -> Vec<&'static str> {
        tables::PROBED_FILES
            .iter()
            .copied()
            .filter(|path| self.get(path).is_some())
            .collect()
    }

    fn slot_mut(&mut self, path: &str) -> Option<&mut Option<String>> {
        match path {
            tables::PACKAGE_MANIFEST => Some(&mut self.package_json),
            tables::PYTHON_REQUIREMENTS => Some(&mut self.requirements_txt),
            tables::GO_MODULE => Some(&mut self.go_mod),
            tables::CARGO_MANIFEST => Some(&mut self.cargo_toml),
            tables::README => Some(&mut self.readme),
            tables::DOCKERFILE => Some(&mut self.dockerfile),
            tables::WRANGLER_CONFIG => Some(&mut self.wrangler_toml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: Option<BTreeMap<String, Value>>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: Option<BTreeMap<String, Value>>,
}

/// Signals from `package.json` dependencies.
///
/// Packages declared only under `devDependencies` get [`DEV_TOOLING_ROLE`].
/// Runtime signals come first, so a technology reached through both a runtime
/// and a dev-only package keeps its runtime role under first-wins merging.
/// An unparseable manifest yields nothing, including the platform signals.
pub fn manifest_signals(content: &str) -> Vec<Signal> {
    let manifest: PackageManifest = match serde_json::from_str(content) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!(error = %e, "Ignoring malformed package.json");
            return Vec::new();
        }
    };

    let runtime = manifest.dependencies.unwrap_or_default();
    let dev = manifest.dev_dependencies.unwrap_or_default();

    let mut signals: Vec<Signal> = PACKAGE_TABLE
        .iter()
        .filter(|(package, _, _)| runtime.contains_key(*package))
        .map(|(_, tech, role)| Signal::new(tech, role, SignalSource::Manifest))
        .collect();

    signals.extend(
        PACKAGE_TABLE
            .iter()
            .filter(|(package, _, _)| dev.contains_key(*package) && !runtime.contains_key(*package))
            .map(|(_, tech, _)| Signal::new(tech, DEV_TOOLING_ROLE, SignalSource::Manifest)),
    );

    signals.extend(
        MANIFEST_PLATFORM
            .iter()
            .map(|(tech, role)| Signal::new(tech, role, SignalSource::Manifest)),
    );

    signals
}

/// Signals implied by marker file presence, plus Python frameworks named in requirements
pub fn marker_file_signals(snapshot: &RepoSnapshot) -> Vec<Signal> {
    let mut signals = Vec::new();

    for (path, tech) in MARKER_FILES {
        let Some(content) = snapshot.get(path) else {
            continue;
        };

        signals.push(Signal::new(tech, tables::role_for(tech), SignalSource::MarkerFile));

        if *path == tables::PYTHON_REQUIREMENTS {
            let lower = content.to_lowercase();
            for (needle, framework) in PYTHON_FRAMEWORKS {
                if lower.contains(needle) {
                    signals.push(Signal::new(
                        framework,
                        tables::role_for(framework),
                        SignalSource::MarkerFile,
                    ));
                }
            }
        }
    }

    signals
}

fn word_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        README_WORD_KEYWORDS
            .iter()
            .map(|(tech, word)| {
                let pattern = format!(r"\b{}\b", regex::escape(word));
                (*tech, Regex::new(&pattern).expect("valid regex"))
            })
            .collect()
    })
}

/// Signals from case-insensitive keyword matches in the README
///
/// Short words such as `go` only match on word boundaries, so punctuation
/// after them still counts while `django` or `mongo` do not.
pub fn readme_signals(content: &str) -> Vec<Signal> {
    let lower = content.to_lowercase();
    let words = word_patterns();

    README_KEYWORDS
        .iter()
        .filter(|(tech, keywords)| {
            keywords.iter().any(|kw| lower.contains(kw))
                || words
                    .iter()
                    .any(|(name, re)| name == tech && re.is_match(&lower))
        })
        .map(|(tech, _)| Signal::new(tech, tables::role_for(tech), SignalSource::Readme))
        .collect()
}

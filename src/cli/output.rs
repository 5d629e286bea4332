//! Output formatting for multiple formats
//!
//! JSON and YAML serialize the result lists as-is; the human format prints a
//! short table per result kind.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;

use crate::catalog::{TechCatalogEntry, TechStackAnnotation, TechUsage};
use crate::detection::DetectedTechnology;

const RULE_WIDTH: usize = 40;
const NO_ROLE: &str = "(no role)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_detections(&self, repo: &str, detected: &[DetectedTechnology]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(detected, "detections"),
            OutputFormat::Yaml => to_yaml(detected, "detections"),
            OutputFormat::Human => Ok(self.human_detections(repo, detected)),
        }
    }

    pub fn format_matches(&self, repo: &str, matches: &[TechUsage]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(matches, "catalog matches"),
            OutputFormat::Yaml => to_yaml(matches, "catalog matches"),
            OutputFormat::Human => Ok(self.human_matches(repo, matches)),
        }
    }

    /// `catalog` resolves annotation ids to names in the human format
    pub fn format_annotations(
        &self,
        repo: &str,
        entries: &[TechStackAnnotation],
        catalog: &[TechCatalogEntry],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(entries, "annotations"),
            OutputFormat::Yaml => to_yaml(entries, "annotations"),
            OutputFormat::Human => Ok(self.human_annotations(repo, entries, catalog)),
        }
    }

    fn header(title: &str, repo: &str) -> String {
        format!("{}: {}\n{}\n\n", title, repo, "━".repeat(RULE_WIDTH))
    }

    fn human_detections(&self, repo: &str, detected: &[DetectedTechnology]) -> String {
        let mut output = Self::header("Detected Technologies", repo);

        if detected.is_empty() {
            output.push_str("No technologies detected\n");
            return output;
        }

        let width = detected.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);
        for (i, tech) in detected.iter().enumerate() {
            let role = if tech.has_role() { tech.role.as_str() } else { NO_ROLE };
            let _ = writeln!(
                output,
                "{} {:<width$}  {}",
                connector(i, detected.len()),
                tech.name,
                role,
                width = width
            );
        }
        let _ = write!(output, "\n{} technologies\n", detected.len());
        output
    }

    fn human_matches(&self, repo: &str, matches: &[TechUsage]) -> String {
        let mut output = Self::header("Catalog Matches", repo);

        if matches.is_empty() {
            output.push_str("No catalog entries matched\n");
            return output;
        }

        for (i, usage) in matches.iter().enumerate() {
            let _ = writeln!(
                output,
                "{} [{}] {} ({})  {}",
                connector(i, matches.len()),
                usage.tech.id,
                usage.tech.name,
                usage.tech.category.label(),
                usage.usage_role.as_deref().unwrap_or(NO_ROLE)
            );
        }
        output
    }

    fn human_annotations(
        &self,
        repo: &str,
        entries: &[TechStackAnnotation],
        catalog: &[TechCatalogEntry],
    ) -> String {
        let mut output = Self::header("Tech Stack", repo);

        if entries.is_empty() {
            output.push_str("No annotations\n");
            return output;
        }

        for (i, entry) in entries.iter().enumerate() {
            let name = catalog
                .iter()
                .find(|tech| tech.id == entry.id)
                .map(|tech| tech.name.as_str())
                .unwrap_or("?");
            let role = match entry.usage_role.as_deref() {
                Some(role) if !role.is_empty() => role,
                _ => NO_ROLE,
            };
            let _ = writeln!(
                output,
                "{} [{}] {}  {}",
                connector(i, entries.len()),
                entry.id,
                name,
                role
            );
        }
        output
    }
}

fn connector(index: usize, len: usize) -> &'static str {
    if index + 1 == len {
        "\u{2514}\u{2500}"
    } else {
        "\u{251C}\u{2500}"
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}

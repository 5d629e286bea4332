//! Command handlers. Each returns the process exit code.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::commands::{DetectArgs, FetchArgs, ReconcileArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::catalog::{
    match_catalog, InMemoryCatalog, RoleReconciler, TechCatalogEntry, TechStackAnnotation,
};
use crate::config::AppIndexConfig;
use crate::detection::TechDetector;
use crate::github::RepoRef;

pub async fn handle_detect(args: &DetectArgs) -> i32 {
    match run_detect(args).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Detection failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub async fn handle_reconcile(args: &ReconcileArgs) -> i32 {
    match run_reconcile(args).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Reconciliation failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

async fn run_detect(args: &DetectArgs) -> Result<String> {
    let catalog = args
        .catalog
        .as_deref()
        .map(read_json::<Vec<TechCatalogEntry>>)
        .transpose()?;

    let detector = build_detector(&args.fetch)?;
    let repo = display_name(&args.github_url);
    let detected = detector.detect(&args.github_url).await;

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    match catalog {
        Some(catalog) => {
            let matches = match_catalog(&detected, &catalog);
            info!(
                detected = detected.len(),
                matched = matches.len(),
                "Matched detections against catalog"
            );
            formatter.format_matches(&repo, &matches)
        }
        None => formatter.format_detections(&repo, &detected),
    }
}

async fn run_reconcile(args: &ReconcileArgs) -> Result<String> {
    let catalog: Vec<TechCatalogEntry> = read_json(&args.catalog)?;
    let entries: Vec<TechStackAnnotation> = read_json(&args.entries)?;

    let detector = build_detector(&args.fetch)?;
    let store = InMemoryCatalog::with_tech_stacks(catalog.clone());
    let reconciled = RoleReconciler::new(detector)
        .reconcile(Some(&args.github_url), entries, &store)
        .await
        .context("Failed to reconcile usage roles")?;

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    formatter.format_annotations(&display_name(&args.github_url), &reconciled, &catalog)
}

/// Environment configuration with command-line overrides applied
fn load_config(fetch: &FetchArgs) -> Result<AppIndexConfig> {
    let mut config = AppIndexConfig::default();
    if let Some(token) = fetch.token.as_ref().filter(|t| !t.trim().is_empty()) {
        config.github_token = Some(token.clone());
    }
    if let Some(timeout) = fetch.timeout {
        config.request_timeout_secs = timeout;
    }
    config.validate().context("Invalid configuration")?;

    debug!(config = ?config, "Loaded configuration");
    Ok(config)
}

fn build_detector(fetch: &FetchArgs) -> Result<TechDetector> {
    let config = load_config(fetch)?;
    let client = config
        .content_client()
        .context("Failed to create GitHub client")?;
    if !client.has_credentials() {
        debug!("No GitHub credentials configured, unauthenticated rate limits apply");
    }
    debug!(api = client.base_url(), "GitHub content client ready");
    Ok(TechDetector::new(Arc::new(client)))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn display_name(github_url: &str) -> String {
    RepoRef::parse(github_url)
        .map(|repo| repo.to_string())
        .unwrap_or_else(|| github_url.to_string())
}

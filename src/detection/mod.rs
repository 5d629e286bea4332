//! GitHub technology detection
//!
//! Heuristic, best-effort classification of a repository's tech stack from a
//! fixed set of probed files. See [`TechDetector`] for the entry point.

pub mod detector;
mod merge;
pub mod signals;
pub mod tables;
pub mod types;

pub use detector::{detect_from_snapshot, detect_tech_from_github, TechDetector};
pub use merge::DetectionSet;
pub use signals::RepoSnapshot;
pub use types::{DetectedTechnology, Signal, SignalSource};

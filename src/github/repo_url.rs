//! GitHub repository URL parsing

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn github_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"github\.com/([^/]+)/([^/?#]+)").expect("static regex is valid")
    })
}

/// Owner/repository pair extracted from a GitHub URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parses `.../github.com/<owner>/<repo>[.git]`.
    ///
    /// Returns `None` for anything else; callers treat that as "nothing to detect".
    pub fn parse(url: &str) -> Option<Self> {
        let captures = github_url_pattern().captures(url)?;
        let owner = captures.get(1)?.as_str();
        let repo = captures.get(2)?.as_str();
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        if owner.is_empty() || repo.is_empty() {
            return None;
        }

        Some(Self::new(owner, repo))
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        https = { "https://github.com/acme/widgets", "acme", "widgets" },
        dot_git = { "https://github.com/acme/widgets.git", "acme", "widgets" },
        trailing_path = { "https://github.com/acme/widgets/tree/main/src", "acme", "widgets" },
        no_scheme = { "github.com/acme/widgets", "acme", "widgets" },
        query = { "https://github.com/acme/widgets?tab=readme", "acme", "widgets" },
    )]
    fn test_parse_valid(url: &str, owner: &str, repo: &str) {
        let parsed = RepoRef::parse(url).unwrap();
        assert_eq!(parsed.owner, owner);
        assert_eq!(parsed.repo, repo);
    }

    #[parameterized(
        gitlab = { "https://gitlab.com/acme/widgets" },
        owner_only = { "https://github.com/acme" },
        empty = { "" },
        bare_dot_git = { "https://github.com/acme/.git" },
    )]
    fn test_parse_invalid(url: &str) {
        assert_eq!(RepoRef::parse(url), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RepoRef::new("acme", "widgets").to_string(), "acme/widgets");
    }
}

//! Repository locator parsing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::BlogError;

/// Matches `[scheme://][www.]github.com/<owner>/<name>` at the start of the
/// input. The name must end at `/`, `?`, `#` or the end of the input.
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static GITHUB_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.)?github\.com/(?P<owner>[^/?#\s]+)/(?P<name>[^/?#\s]+)(?:[/?#]|$)",
    )
    .unwrap()
});

/// Owner/name pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLocator {
    /// Account or organisation that owns the repository.
    pub owner: String,
    /// Repository name, never carrying a `.git` suffix.
    pub name: String,
}

impl RepoLocator {
    /// Parses a repository URL.
    ///
    /// Accepts the URL with or without a scheme and a `www.` subdomain, and
    /// ignores anything after the first two path segments. Surrounding
    /// whitespace is trimmed; whitespace inside a segment is rejected.
    pub fn parse(url: &str) -> Result<Self, BlogError> {
        let invalid = || BlogError::InvalidLocator {
            url: url.to_string(),
        };

        let captures = GITHUB_URL_PATTERN
            .captures(url.trim())
            .ok_or_else(invalid)?;
        let owner = &captures["owner"];
        let raw_name = &captures["name"];
        let name = raw_name.strip_suffix(".git").unwrap_or(raw_name);

        if name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

//! Commit listing via the GitHub REST API.

use hyper::ext::ReasonPhrase;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::RepoLocator;
use crate::config::Config;
use crate::error::BlogError;

/// Media type GitHub recommends for REST API requests.
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Canonical commit representation handed to the prompt composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit message.
    pub message: String,
    /// Author display name.
    pub author: String,
    /// Author date as the ISO-8601 string GitHub returned.
    pub date: String,
}

/// Element of the `GET /repos/{owner}/{repo}/commits` response.
#[derive(Deserialize, Debug)]
struct GitHubCommit {
    commit: GitCommitDetail,
}

/// The nested `commit` object.
#[derive(Deserialize, Debug)]
struct GitCommitDetail {
    message: String,
    author: GitSignature,
}

/// The nested `commit.author` object.
#[derive(Deserialize, Debug)]
struct GitSignature {
    name: String,
    date: String,
}

impl From<GitHubCommit> for CommitRecord {
    fn from(raw: GitHubCommit) -> Self {
        Self {
            message: raw.commit.message,
            author: raw.commit.author.name,
            date: raw.commit.author.date,
        }
    }
}

/// Client for the GitHub commit listing endpoint.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client for API requests.
    client: Client,
    /// Personal access token; checked when a fetch is attempted.
    token: Option<String>,
    /// API root, e.g. `https://api.github.com`.
    api_base: Url,
}

impl GitHubClient {
    /// Creates a client against an explicit API root.
    pub fn new(token: Option<String>, api_base: Url) -> Self {
        Self {
            client: Client::new(),
            token,
            api_base,
        }
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.github_token.clone(), config.github_api_url.clone())
    }

    /// Builds the commit listing URL for a repository.
    fn commits_url(&self, locator: &RepoLocator) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", &locator.owner, &locator.name, "commits"]);
        }
        url
    }

    /// Fetches the first page of commits, newest first.
    ///
    /// The whole fetch fails if any element lacks `commit.message`,
    /// `commit.author.name` or `commit.author.date`.
    pub async fn fetch_commits(&self, locator: &RepoLocator) -> Result<Vec<CommitRecord>, BlogError> {
        let token = self
            .token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(BlogError::MissingCredential {
                variable: "GITHUB_TOKEN",
            })?;

        let url = self.commits_url(locator);
        info!(repository = %locator, url = %url, "Fetching commits from GitHub");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(USER_AGENT, concat!("blogcommits/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| BlogError::Network {
                service: "GitHub",
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BlogError::ProviderError {
                status: status.as_u16(),
                status_text: reason_phrase(status, response.extensions().get::<ReasonPhrase>()),
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| BlogError::MalformedCommit {
            index: 0,
            reason: format!("response body is not JSON: {e}"),
        })?;

        let commits = parse_commit_listing(body)?;
        info!(repository = %locator, count = commits.len(), "Found commits");
        Ok(commits)
    }
}

/// The reason phrase the server sent, or the canonical one for `status`.
///
/// hyper only records a phrase when it differs from the canonical text.
fn reason_phrase(status: StatusCode, sent: Option<&ReasonPhrase>) -> String {
    sent.and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .or_else(|| status.canonical_reason())
        .unwrap_or_default()
        .to_string()
}

/// Flattens a commit listing, failing on the first malformed element.
fn parse_commit_listing(body: serde_json::Value) -> Result<Vec<CommitRecord>, BlogError> {
    let serde_json::Value::Array(items) = body else {
        return Err(BlogError::MalformedCommit {
            index: 0,
            reason: "expected a JSON array of commits".to_string(),
        });
    };

    debug!(element_count = items.len(), "Flattening commit listing");

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<GitHubCommit>(item)
                .map(CommitRecord::from)
                .map_err(|e| BlogError::MalformedCommit {
                    index,
                    reason: e.to_string(),
                })
        })
        .collect()
}

//! Raw GitHub REST API wire types.
//!
//! Only the fields the aggregation reads are declared; everything else in
//! the responses is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A repository as returned by `/users/{username}/repos` and
/// `/search/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepository {
    pub name: String,
    pub owner: GitHubOwner,
    pub html_url: String,
    pub stargazers_count: u32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
}

/// One element of `/repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitItem {
    pub commit: GitHubCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitDetail {
    #[serde(default)]
    pub author: Option<GitHubCommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitAuthor {
    pub date: DateTime<Utc>,
}

/// Response of `/search/issues` — only the total matters for PR counts.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssueSearchResult {
    pub total_count: u32,
}

/// Response of `/search/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepositorySearchResult {
    pub items: Vec<GitHubRepository>,
}

/// One element of `/users/{username}/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEvent {
    pub created_at: DateTime<Utc>,
}

//! GitHub HTTP client.
//!
//! Implements the [`PortfolioSource`] port over the GitHub REST API v3.
//! The portfolio aggregation is the expensive path: one listing call plus
//! languages, latest-commit, and pull-request-count lookups per repository.
//! The last-activity probe is one call and fails soft.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{GitHubConfig, PortfolioRepository, RepositoryEntry, SearchFilter};
use crate::domain::ports::PortfolioSource;

use super::models::{
    GitHubCommitItem, GitHubEvent, GitHubIssueSearchResult, GitHubRepository,
    GitHubRepositorySearchResult,
};

/// HTTP client for the GitHub REST API v3.
///
/// Hard failures map to [`DomainError::Upstream`]; the last-activity
/// probe absorbs its own failures and returns `None`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client.
    http: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new client from configuration.
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    /// Build an authorized GET request with the standard GitHub headers.
    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", "gitfolio");
        if let Some(token) = self.config.token.as_deref().filter(|t| !t.is_empty()) {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        req
    }

    /// Send a request and parse the JSON body, mapping failures to
    /// [`DomainError::Upstream`] tagged with the operation name.
    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        operation: &str,
    ) -> DomainResult<T> {
        let resp = req
            .send()
            .await
            .map_err(|e| DomainError::Upstream(format!("GitHub {operation} request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Upstream(format!(
                "GitHub {operation} returned {status}: {body}"
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| DomainError::Upstream(format!("GitHub {operation} parse failed: {e}")))
    }

    /// Language names for a repository, ordered by bytes of code.
    async fn repository_languages(&self, owner: &str, repo: &str) -> DomainResult<Vec<String>> {
        let url = format!("{}/repos/{owner}/{repo}/languages", self.config.api_url);
        let languages: serde_json::Map<String, serde_json::Value> =
            self.send_json(self.get(&url), "languages").await?;
        Ok(languages.keys().cloned().collect())
    }

    /// Author date of the repository's most recent commit, if any.
    async fn latest_commit_date(
        &self,
        owner: &str,
        repo: &str,
    ) -> DomainResult<Option<DateTime<Utc>>> {
        let url = format!(
            "{}/repos/{owner}/{repo}/commits?per_page=1",
            self.config.api_url
        );
        let commits: Vec<GitHubCommitItem> = self.send_json(self.get(&url), "commits").await?;
        Ok(commits
            .first()
            .and_then(|c| c.commit.author.as_ref())
            .map(|a| a.date))
    }

    /// Total pull requests ever opened against a repository, via the
    /// issue search endpoint (cheapest way to get a count).
    async fn pull_request_count(&self, owner: &str, repo: &str) -> DomainResult<u32> {
        let url = format!("{}/search/issues", self.config.api_url);
        let query = format!("repo:{owner}/{repo} type:pr");
        let result: GitHubIssueSearchResult = self
            .send_json(self.get(&url).query(&[("q", query)]), "search_issues")
            .await?;
        Ok(result.total_count)
    }
}

/// Assemble a `/search/repositories` query string from the optional
/// name term and `language:` / `user:` qualifiers.
fn search_query(filter: &SearchFilter) -> String {
    let mut parts = Vec::new();
    if let Some(name) = filter.name.as_deref().filter(|s| !s.is_empty()) {
        parts.push(name.to_string());
    }
    if let Some(language) = filter.language.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("language:{language}"));
    }
    if let Some(username) = filter.username.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("user:{username}"));
    }
    parts.join(" ")
}

#[async_trait]
impl PortfolioSource for GitHubClient {
    async fn get_portfolio(&self, username: &str) -> DomainResult<Vec<PortfolioRepository>> {
        if username.is_empty() {
            return Err(DomainError::MissingUsername);
        }

        let url = format!("{}/users/{username}/repos?per_page=100", self.config.api_url);
        let repos: Vec<GitHubRepository> = self.send_json(self.get(&url), "list_repos").await?;

        let mut portfolio = Vec::with_capacity(repos.len());
        for repo in repos {
            let owner = repo.owner.login.as_str();

            let languages = self.repository_languages(owner, &repo.name).await?;

            // Empty repositories 409 on the commits endpoint; fall back to
            // the repository's own updated_at rather than failing the run.
            let last_commit = match self.latest_commit_date(owner, &repo.name).await {
                Ok(date) => date,
                Err(err) => {
                    tracing::debug!(
                        repo = %repo.name,
                        error = %err,
                        "commit lookup failed, falling back to updated_at"
                    );
                    None
                }
            }
            .or(repo.updated_at);

            let pull_requests = self.pull_request_count(owner, &repo.name).await?;

            portfolio.push(PortfolioRepository {
                name: repo.name,
                languages,
                last_commit,
                stars: repo.stargazers_count,
                pull_requests,
                url: repo.html_url,
            });
        }

        Ok(portfolio)
    }

    async fn get_last_activity(&self, username: &str) -> Option<DateTime<Utc>> {
        if username.is_empty() {
            return None;
        }

        let url = format!("{}/users/{username}/events?per_page=1", self.config.api_url);
        match self
            .send_json::<Vec<GitHubEvent>>(self.get(&url), "user_events")
            .await
        {
            Ok(events) => events.first().map(|e| e.created_at),
            Err(err) => {
                tracing::warn!(username, error = %err, "activity probe failed, treating as unknown");
                None
            }
        }
    }

    async fn search_repositories(
        &self,
        filter: &SearchFilter,
    ) -> DomainResult<Vec<RepositoryEntry>> {
        let url = format!("{}/search/repositories", self.config.api_url);
        let result: GitHubRepositorySearchResult = self
            .send_json(
                self.get(&url).query(&[("q", search_query(filter))]),
                "search_repos",
            )
            .await?;

        Ok(result
            .items
            .into_iter()
            .map(|repo| RepositoryEntry {
                name: repo.name,
                owner: repo.owner.login,
                url: repo.html_url,
                stars: repo.stargazers_count,
                language: repo.language,
                description: repo.description,
            })
            .collect())
    }
}

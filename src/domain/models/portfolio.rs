//! Portfolio and repository-search models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository in a user's aggregated portfolio.
///
/// Produced in full by the upstream aggregation; immutable once
/// constructed. Serialized camelCase for the HTTP surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRepository {
    /// Repository name.
    pub name: String,
    /// Languages used, ordered by bytes of code (GitHub's ordering).
    pub languages: Vec<String>,
    /// Timestamp of the most recent commit, when it could be determined.
    pub last_commit: Option<DateTime<Utc>>,
    /// Stargazer count.
    pub stars: u32,
    /// Total pull requests opened against the repository.
    pub pull_requests: u32,
    /// Repository home page URL.
    pub url: String,
}

/// One row in an ad-hoc repository search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryEntry {
    pub name: String,
    pub owner: String,
    pub url: String,
    pub stars: u32,
    pub language: Option<String>,
    pub description: Option<String>,
}

/// Repository search filters. All fields are independently optional
/// and combinable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    /// Free-text name term.
    pub name: Option<String>,
    /// Primary language qualifier.
    pub language: Option<String>,
    /// Owning user qualifier.
    pub username: Option<String>,
}

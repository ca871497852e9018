//! Port trait definitions (Hexagonal Architecture)
//!
//! The domain programs against `PortfolioSource`, the contract the GitHub
//! infrastructure adapter implements and the freshness cache decorates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::DomainResult;
use crate::domain::models::{PortfolioRepository, RepositoryEntry, SearchFilter};

/// Source of portfolio data for a GitHub user.
///
/// Implementations exist at two levels: the raw upstream client and the
/// freshness-cache decorator wrapping it. Callers cannot tell them apart.
#[async_trait]
pub trait PortfolioSource: Send + Sync {
    /// Aggregate the user's full portfolio.
    ///
    /// Expensive: costs several upstream calls per repository. Must not
    /// return partial entries; per-repository enrichment that fails falls
    /// back to a coarser signal instead of aborting the aggregation.
    async fn get_portfolio(&self, username: &str) -> DomainResult<Vec<PortfolioRepository>>;

    /// Timestamp of the user's most recent public activity.
    ///
    /// Cheap: one upstream call. Fails soft — any error yields `None`
    /// ("unknown"), never an `Err`.
    async fn get_last_activity(&self, username: &str) -> Option<DateTime<Utc>>;

    /// Ad-hoc repository search. Stateless passthrough, never cached.
    async fn search_repositories(
        &self,
        filter: &SearchFilter,
    ) -> DomainResult<Vec<RepositoryEntry>>;
}

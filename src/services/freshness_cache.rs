//! Freshness-aware portfolio cache.
//!
//! Decorates any [`PortfolioSource`] with a per-username cache that only
//! pays for the expensive full aggregation when the cheap last-activity
//! probe reports something newer than what was cached. A TTL bounds
//! staleness for activity the probe cannot see, and bounds upstream load
//! for idle users (one cheap call per request, zero expensive ones).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use crate::domain::errors::DomainResult;
use crate::domain::models::{PortfolioRepository, RepositoryEntry, SearchFilter};
use crate::domain::ports::PortfolioSource;

/// Default TTL for cached portfolios.
const PORTFOLIO_CACHE_TTL_SECS: u64 = 30 * 60;

/// Cached state for one username.
///
/// The portfolio and its activity marker live in one slot under one
/// expiry, so they are read and replaced together and a torn read
/// between them is impossible. An expired slot counts as absent.
#[derive(Debug, Default)]
struct CacheSlot {
    /// The cached portfolio, if any was ever stored.
    portfolio: Option<Vec<PortfolioRepository>>,
    /// Most recent upstream activity observed when the portfolio was
    /// (re)computed. Only ever written alongside a successful refresh.
    last_activity: Option<DateTime<Utc>>,
    /// Instant after which the slot counts as absent.
    expires_at: Option<DateTime<Utc>>,
}

impl CacheSlot {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now < expires_at)
    }
}

/// Refresh policy, evaluated in order:
/// no valid cached portfolio; or current activity strictly newer than the
/// cached marker; or current activity present with no cached marker.
/// An unknown current activity (`None`) never triggers a refresh on its own.
fn should_refresh(
    has_cached_portfolio: bool,
    cached_marker: Option<DateTime<Utc>>,
    current_activity: Option<DateTime<Utc>>,
) -> bool {
    if !has_cached_portfolio {
        return true;
    }
    match (current_activity, cached_marker) {
        (Some(current), Some(cached)) => current > cached,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Freshness-cache decorator around a [`PortfolioSource`].
///
/// `get_portfolio` is cached per username; `get_last_activity` and
/// `search_repositories` pass through untouched.
pub struct CachedPortfolioSource<S: PortfolioSource> {
    inner: Arc<S>,
    ttl: TimeDelta,
    /// Keyed lock table: one slot per username. The outer lock is held
    /// only long enough to fetch or insert the slot Arc; the slot lock
    /// is held across the whole read-decide-write sequence so concurrent
    /// requests for one username never both pay the expensive refresh.
    slots: Mutex<HashMap<String, Arc<Mutex<CacheSlot>>>>,
}

impl<S: PortfolioSource> CachedPortfolioSource<S> {
    /// Create a cached source with the default 30-minute TTL.
    pub fn new(inner: Arc<S>) -> Self {
        Self::with_ttl(inner, Duration::from_secs(PORTFOLIO_CACHE_TTL_SECS))
    }

    /// Create with a custom TTL.
    pub fn with_ttl(inner: Arc<S>, ttl: Duration) -> Self {
        let ttl = TimeDelta::from_std(ttl)
            .unwrap_or_else(|_| TimeDelta::seconds(PORTFOLIO_CACHE_TTL_SECS as i64));
        Self {
            inner,
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    async fn slot(&self, username: &str) -> Arc<Mutex<CacheSlot>> {
        let mut slots = self.slots.lock().await;
        slots.entry(username.to_string()).or_default().clone()
    }
}

#[async_trait]
impl<S: PortfolioSource + 'static> PortfolioSource for CachedPortfolioSource<S> {
    async fn get_portfolio(&self, username: &str) -> DomainResult<Vec<PortfolioRepository>> {
        let slot = self.slot(username).await;
        let mut slot = slot.lock().await;

        let now = Utc::now();
        let fresh = slot.is_fresh(now);
        let cached_marker = if fresh { slot.last_activity } else { None };
        let has_cached_portfolio = fresh && slot.portfolio.is_some();

        // The cheap probe runs on every request; its cost is one call.
        let current_activity = self.inner.get_last_activity(username).await;

        if !should_refresh(has_cached_portfolio, cached_marker, current_activity) {
            if let Some(portfolio) = slot.portfolio.clone() {
                tracing::info!(username, "no new activity, serving portfolio from cache");
                return Ok(portfolio);
            }
        }

        match (cached_marker, current_activity) {
            (Some(cached), Some(current)) if current > cached => {
                tracing::info!(
                    username,
                    cached = %cached,
                    current = %current,
                    "new GitHub activity detected, refreshing portfolio"
                );
            }
            _ => {
                tracing::info!(username, "no valid cached portfolio, fetching from GitHub");
            }
        }

        // Expensive aggregation. On error nothing is committed and the
        // prior slot contents stay servable.
        let portfolio = self.inner.get_portfolio(username).await?;

        slot.portfolio = Some(portfolio.clone());
        slot.expires_at = Some(
            now.checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        );
        if let Some(current) = current_activity {
            slot.last_activity = Some(current);
        }

        Ok(portfolio)
    }

    async fn get_last_activity(&self, username: &str) -> Option<DateTime<Utc>> {
        self.inner.get_last_activity(username).await
    }

    async fn search_repositories(
        &self,
        filter: &SearchFilter,
    ) -> DomainResult<Vec<RepositoryEntry>> {
        self.inner.search_repositories(filter).await
    }
}

//! Domain errors for the portfolio aggregation system.

use thiserror::Error;

/// Domain-level errors that can occur while serving portfolio requests.
///
/// The cheap activity check has no variant here on purpose: it fails soft
/// inside the [`PortfolioSource`](crate::domain::ports::PortfolioSource)
/// implementation and surfaces as `None`, never as an error.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("GitHub username is not configured")]
    MissingUsername,

    #[error("GitHub request failed: {0}")]
    Upstream(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

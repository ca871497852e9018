//! Gitfolio - GitHub portfolio aggregation API.
//!
//! Gitfolio exposes a small HTTP API that aggregates a GitHub user's
//! repositories into a portfolio view (languages, last commit, stars,
//! pull-request counts) and supports ad-hoc repository search. Portfolio
//! requests are served through a freshness-aware cache that only pays for
//! the expensive aggregation when new user activity is detected upstream.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layering:
//!
//! - **Domain Layer** (`domain`): models, errors, and the `PortfolioSource`
//!   port the rest of the system programs against
//! - **Service Layer** (`services`): the freshness cache decorator
//! - **Infrastructure Layer** (`infrastructure`): the GitHub REST client
//!   and the configuration loader
//! - **API Layer** (`api`): the axum HTTP adapter

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    CacheConfig, Config, GitHubConfig, LoggingConfig, PortfolioRepository, RepositoryEntry,
    SearchFilter, ServerConfig,
};
pub use domain::ports::PortfolioSource;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::github::GitHubClient;
pub use services::CachedPortfolioSource;

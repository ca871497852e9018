//! Domain models.

pub mod config;
pub mod portfolio;

pub use config::{CacheConfig, Config, GitHubConfig, LoggingConfig, ServerConfig};
pub use portfolio::{PortfolioRepository, RepositoryEntry, SearchFilter};

//! Service layer: business logic over the domain ports.

pub mod freshness_cache;

pub use freshness_cache::CachedPortfolioSource;

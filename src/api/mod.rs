//! HTTP API layer (axum adapter).

pub mod http;

pub use http::{build_router, lowercase_uri_path, PortfolioHttpServer};

//! GitHub REST API integration.
//!
//! `client` implements the `PortfolioSource` port over the GitHub REST
//! API v3; `models` holds the raw wire types it deserializes.

pub mod client;
pub mod models;

pub use client::GitHubClient;

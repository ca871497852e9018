//! Domain layer for the portfolio aggregation system.
//!
//! Contains the core models, error types, and port traits.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};

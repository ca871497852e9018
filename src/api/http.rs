//! Portfolio HTTP server.
//!
//! Thin request/response adapter over a [`PortfolioSource`]: handlers do
//! nothing beyond extracting parameters and mapping errors to a generic
//! 500 response carrying the error's message. Paths are matched
//! case-insensitively via [`lowercase_uri_path`], applied around the
//! router so it runs before route matching.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, Request, State},
    http::uri::{PathAndQuery, Uri},
    http::StatusCode,
    response::Json,
    routing::get,
    Router, ServiceExt,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::errors::DomainError;
use crate::domain::models::{PortfolioRepository, RepositoryEntry, SearchFilter, ServerConfig};
use crate::domain::ports::PortfolioSource;

/// Query parameters for repository search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Error response body: `{"message": "<error text>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Shared state for the portfolio HTTP server.
struct AppState<S: PortfolioSource> {
    source: Arc<S>,
    /// The configured identity whose portfolio is served.
    username: String,
}

/// Portfolio HTTP server.
pub struct PortfolioHttpServer<S: PortfolioSource + 'static> {
    config: ServerConfig,
    source: Arc<S>,
    username: String,
}

impl<S: PortfolioSource + 'static> PortfolioHttpServer<S> {
    pub fn new(source: Arc<S>, username: impl Into<String>, config: ServerConfig) -> Self {
        Self {
            config,
            source,
            username: username.into(),
        }
    }

    /// Start the server.
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = build_router(self.source, self.username);
        let app = tower::util::MapRequestLayer::new(lowercase_uri_path).layer(router);

        tracing::info!("Portfolio HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app.into_make_service()).await?;
        Ok(())
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = build_router(self.source, self.username);
        let app = tower::util::MapRequestLayer::new(lowercase_uri_path).layer(router);

        tracing::info!("Portfolio HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

/// Build the router.
pub fn build_router<S: PortfolioSource + 'static>(
    source: Arc<S>,
    username: impl Into<String>,
) -> Router {
    let state = Arc::new(AppState {
        source,
        username: username.into(),
    });

    Router::new()
        .route("/api/portfolio", get(get_portfolio::<S>))
        .route("/api/portfolio/search", get(search_repositories::<S>))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Lowercase the request path so routes match case-insensitively.
///
/// Must be layered around the router (not on it) to run before routing.
pub fn lowercase_uri_path(mut request: Request) -> Request {
    let uri = request.uri();
    if !uri.path().bytes().any(|b| b.is_ascii_uppercase()) {
        return request;
    }

    let mut path_and_query = uri.path().to_ascii_lowercase();
    if let Some(query) = uri.query() {
        path_and_query.push('?');
        path_and_query.push_str(query);
    }

    if let Ok(path_and_query) = PathAndQuery::try_from(path_and_query.as_str()) {
        let mut parts = uri.clone().into_parts();
        parts.path_and_query = Some(path_and_query);
        if let Ok(new_uri) = Uri::from_parts(parts) {
            *request.uri_mut() = new_uri;
        }
    }
    request
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn get_portfolio<S: PortfolioSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<PortfolioRepository>>, (StatusCode, Json<ErrorResponse>)> {
    match state.source.get_portfolio(&state.username).await {
        Ok(portfolio) => Ok(Json(portfolio)),
        Err(err) => Err(internal_error(&err)),
    }
}

async fn search_repositories<S: PortfolioSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RepositoryEntry>>, (StatusCode, Json<ErrorResponse>)> {
    let filter = SearchFilter {
        name: params.name,
        language: params.language,
        username: params.username,
    };
    match state.source.search_repositories(&filter).await {
        Ok(results) => Ok(Json(results)),
        Err(err) => Err(internal_error(&err)),
    }
}

fn internal_error(err: &DomainError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            message: err.to_string(),
        }),
    )
}

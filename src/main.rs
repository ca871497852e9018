//! Gitfolio server entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gitfolio::api::PortfolioHttpServer;
use gitfolio::infrastructure::config::ConfigLoader;
use gitfolio::infrastructure::github::GitHubClient;
use gitfolio::services::CachedPortfolioSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = Arc::new(GitHubClient::new(config.github.clone())?);
    let cached = Arc::new(CachedPortfolioSource::with_ttl(client, config.cache.ttl()));

    let server = PortfolioHttpServer::new(cached, config.github.username.clone(), config.server);
    server.serve().await
}

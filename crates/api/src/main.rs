use std::sync::Arc;

use aggregator::UserAggregator;
use anyhow::Result;
use api::{build_router, ApiState};
use axum::Router;
use common::{config::AppConfig, logging};
use gh_client::{GithubClient, HttpExec, ReqwestExecutor, RestGithubClient};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging("info");
    let config = AppConfig::load()?;

    let exec: Arc<dyn HttpExec> = Arc::new(ReqwestExecutor::new(&config.github.user_agent));
    let client: Arc<dyn GithubClient> = Arc::new(RestGithubClient::new(exec, &config.github)?);
    let aggregator = Arc::new(UserAggregator::new(client, config.cache.capacity));

    let metrics_path: &'static str =
        Box::leak(config.observability.metrics_path.clone().into_boxed_str());
    let state = Arc::new(ApiState {
        aggregator,
        metrics_path,
    });
    let app: Router = build_router(state);

    let addr: std::net::SocketAddr = config.api.bind.parse()?;
    info!("api listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

//! Standalone saved search service.

use anyhow::Context;
use backend::{
    api::saved_searches::{AppState, router},
    config::BackendConfig,
    logging,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let config = BackendConfig::from_env()?;
    let app = router(AppState::new(&config));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("saved search service listening on {}", config.bind_addr);
    axum::serve(listener, app).await.context("saved search service stopped")?;
    Ok(())
}

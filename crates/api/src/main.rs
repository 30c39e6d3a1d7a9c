use std::sync::Arc;

use anyhow::Context;

use stockflow_api::app::{build_app, services::AppServices};
use stockflow_api::config::AppConfig;
use stockflow_infra::Ledger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockflow_observability::init();

    let config = AppConfig::from_env();
    let ledger = Arc::new(Ledger::open(&config.data_dir));
    let app = build_app(Arc::new(AppServices::new(ledger)));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

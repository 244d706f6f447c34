use std::sync::Arc;

use anyhow::Context;

use shipplan_api::{config::ApiConfig, history::InMemoryHistorySource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shipplan_observability::init();

    let config = ApiConfig::from_env()?;

    let history = match &config.history_file {
        Some(path) => InMemoryHistorySource::from_json_file(path)
            .with_context(|| format!("failed to seed history from {}", path.display()))?,
        None => {
            tracing::info!("no history file configured; starting with empty history");
            InMemoryHistorySource::new()
        }
    };
    tracing::info!(records = history.len(), "history source ready");

    let app = shipplan_api::app::build_app(Arc::new(history));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

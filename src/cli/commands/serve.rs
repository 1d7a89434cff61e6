use crate::cli::PoolArgs;
use crate::core::ProcessingConfig;
use crate::server::{run_server, AppState};
use crate::services::{ServerConfig, TracingProgressReporter};
use crate::storage::memory::InMemoryItemStore;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// インメモリストアでHTTPサーバーを起動する
pub async fn execute_serve(server: ServerConfig, seed: Option<&Path>, pool: &PoolArgs) -> Result<()> {
    let config = pool.to_config()?;

    let store = match seed {
        Some(path) => InMemoryItemStore::load_from_json_file(path).await?,
        None => InMemoryItemStore::new(),
    };
    info!(
        items = store.len().await,
        core_pool_size = config.core_pool_size(),
        max_pool_size = config.max_pool_size(),
        queue_capacity = config.queue_capacity(),
        "Item store ready"
    );

    let state = AppState::from_store(Arc::new(store), config, TracingProgressReporter::new())?;
    run_server(&server, state).await
}

use crate::cli::PoolArgs;
use crate::core::{BatchProcessor, ProcessingReport};
use crate::engine::ItemBatchProcessor;
use crate::services::TracingProgressReporter;
use crate::storage::memory::InMemoryItemStore;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// シードファイルのアイテムを1回だけバッチ処理し、レポートを出力する
pub async fn execute_process(
    seed: &Path,
    output: Option<&Path>,
    pool: &PoolArgs,
) -> Result<ProcessingReport> {
    if !seed.is_file() {
        anyhow::bail!("Seed file does not exist: {}", seed.display());
    }

    let config = pool.to_config()?;
    let store = InMemoryItemStore::load_from_json_file(seed).await?;
    info!(items = store.len().await, seed = %seed.display(), "Loaded seed items");

    let processor = ItemBatchProcessor::new(Arc::new(store), config, TracingProgressReporter::new())?;
    let report = processor.process_all().await?;

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    match output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            info!(output = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }

    Ok(report)
}

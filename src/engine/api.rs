// 高レベル公開API
// ItemBatchProcessorを簡単に組み立てるための便利な関数

use super::ItemBatchProcessor;
use crate::{
    core::{ProcessingConfig, ProcessingResult, ProgressReporter},
    services::{DefaultProcessingConfig, NoOpProgressReporter, TracingProgressReporter},
    storage::ItemStore,
};
use std::sync::Arc;

/// デフォルト設定での処理エンジン作成
pub fn create_default_batch_processor<S>(
    store: Arc<S>,
) -> ProcessingResult<ItemBatchProcessor<S, DefaultProcessingConfig, TracingProgressReporter>>
where
    S: ItemStore + 'static,
{
    ItemBatchProcessor::new(
        store,
        DefaultProcessingConfig::default(),
        TracingProgressReporter::new(),
    )
}

/// 静音版の処理エンジン作成
///
/// テストやバックグラウンド処理用
pub fn create_quiet_batch_processor<S>(
    store: Arc<S>,
) -> ProcessingResult<ItemBatchProcessor<S, DefaultProcessingConfig, NoOpProgressReporter>>
where
    S: ItemStore + 'static,
{
    ItemBatchProcessor::new(
        store,
        DefaultProcessingConfig::default(),
        NoOpProgressReporter::new(),
    )
}

/// 設定とレポーターを指定して作成
pub fn create_custom_batch_processor<S, C, R>(
    store: Arc<S>,
    config: C,
    reporter: R,
) -> ProcessingResult<ItemBatchProcessor<S, C, R>>
where
    S: ItemStore + 'static,
    C: ProcessingConfig + 'static,
    R: ProgressReporter + 'static,
{
    ItemBatchProcessor::new(store, config, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BatchProcessor, Item, ProcessingError};
    use crate::storage::memory::InMemoryItemStore;
    use std::time::Duration;

    #[tokio::test]
    async fn test_default_processor_uses_default_pool() {
        let processor = create_default_batch_processor(Arc::new(InMemoryItemStore::new())).unwrap();

        assert_eq!(processor.config().core_pool_size(), 5);
        assert_eq!(processor.config().max_pool_size(), 10);
        assert_eq!(processor.config().queue_capacity(), 20);
    }

    #[tokio::test]
    async fn test_custom_processor_runs() {
        let store = InMemoryItemStore::with_items(vec![Item::new("A", "a", "NEW", "a@test.com")])
            .await
            .unwrap();
        let processor = create_custom_batch_processor(
            Arc::new(store),
            DefaultProcessingConfig::from_preset(crate::services::ConfigPreset::Testing),
            NoOpProgressReporter::new(),
        )
        .unwrap();

        let report = processor.process_all().await.unwrap();
        assert_eq!(report.processed_items, 1);
    }

    #[tokio::test]
    async fn test_quiet_processor_counts_processed_items() {
        let store = InMemoryItemStore::with_items(vec![Item::new("A", "a", "NEW", "a@test.com")])
            .await
            .unwrap();
        let processor = create_quiet_batch_processor(Arc::new(store)).unwrap();

        assert_eq!(processor.processed_count(), 0);
        assert_eq!(processor.config().per_item_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_custom_processor_rejects_zero_queue() {
        let config = DefaultProcessingConfig::default()
            .with_queue_capacity(0)
            .with_per_item_delay(Duration::ZERO);

        let result = create_custom_batch_processor(
            Arc::new(InMemoryItemStore::new()),
            config,
            NoOpProgressReporter::new(),
        );

        assert!(matches!(
            result.err(),
            Some(ProcessingError::ConfigurationError { .. })
        ));
    }
}

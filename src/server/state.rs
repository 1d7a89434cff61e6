// HTTPハンドラ間で共有するアプリケーション状態

use crate::core::{BatchProcessor, ProcessingConfig, ProcessingResult, ProgressReporter};
use crate::engine::ItemBatchProcessor;
use crate::services::ItemService;
use crate::storage::ItemStore;
use std::sync::Arc;

/// ハンドラ共有状態
///
/// 全フィールドを `Arc` で保持するので複製は安価
#[derive(Clone)]
pub struct AppState {
    /// CRUD操作
    pub items: Arc<ItemService<Arc<dyn ItemStore>>>,
    /// バッチ処理エンジン
    pub processor: Arc<dyn BatchProcessor>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>, processor: Arc<dyn BatchProcessor>) -> Self {
        Self {
            items: Arc::new(ItemService::new(store)),
            processor,
        }
    }

    /// 同じストアを共有する処理エンジンを組み立てて作成
    pub fn from_store<S, C, R>(store: Arc<S>, config: C, reporter: R) -> ProcessingResult<Self>
    where
        S: ItemStore + 'static,
        C: ProcessingConfig + 'static,
        R: ProgressReporter + 'static,
    {
        let processor = ItemBatchProcessor::new(Arc::clone(&store), config, reporter)?;
        Ok(Self::new(store, Arc::new(processor)))
    }
}

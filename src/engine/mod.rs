// エンジン層 - 並列処理とオーケストレーション
// サービス層を組み合わせてバッチジョブを提供

pub mod api;
pub mod batch_processor;
pub mod job;
pub mod worker_pool;

// 公開API - 主要エンジンクラス
pub use api::{
    create_custom_batch_processor, create_default_batch_processor, create_quiet_batch_processor,
};
pub use batch_processor::ItemBatchProcessor;
pub use job::JobHandle;
pub use worker_pool::{PoolSettings, TaskHandle, WorkerPool};

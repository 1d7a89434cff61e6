// バッチ処理システムのトレイト定義
// 全ての抽象化インターフェースを定義

use super::error::ProcessingResult;
use super::types::{ItemId, ProcessingReport};
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// バッチ処理の設定を抽象化するトレイト
#[automock]
pub trait ProcessingConfig: Send + Sync {
    /// 常駐ワーカー数を取得
    fn core_pool_size(&self) -> usize;

    /// ワーカー数の上限を取得
    fn max_pool_size(&self) -> usize;

    /// 待機キューの容量を取得
    fn queue_capacity(&self) -> usize;

    /// アイテム1件あたりの固定処理遅延
    fn per_item_delay(&self) -> Duration;

    /// 追加ワーカーがアイドル状態で待機する時間
    fn worker_keep_alive(&self) -> Duration;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

// ProcessingConfig for Box<dyn ProcessingConfig>
impl ProcessingConfig for Box<dyn ProcessingConfig> {
    fn core_pool_size(&self) -> usize {
        self.as_ref().core_pool_size()
    }

    fn max_pool_size(&self) -> usize {
        self.as_ref().max_pool_size()
    }

    fn queue_capacity(&self) -> usize {
        self.as_ref().queue_capacity()
    }

    fn per_item_delay(&self) -> Duration {
        self.as_ref().per_item_delay()
    }

    fn worker_keep_alive(&self) -> Duration {
        self.as_ref().worker_keep_alive()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.as_ref().enable_progress_reporting()
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, total_items: usize);

    /// 進捗更新の報告
    async fn report_progress(&self, completed: usize, total: usize);

    /// 処理時点でアイテムが存在しなかった場合の報告
    async fn report_not_found(&self, id: ItemId);

    /// アイテム処理失敗時の報告
    async fn report_failure(&self, id: ItemId, error: &str);

    /// 処理完了時の報告
    async fn report_completed(&self, processed: usize, not_found: usize, failed: usize);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_items: usize) {
        self.as_ref().report_started(total_items).await
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        self.as_ref().report_progress(completed, total).await
    }

    async fn report_not_found(&self, id: ItemId) {
        self.as_ref().report_not_found(id).await
    }

    async fn report_failure(&self, id: ItemId, error: &str) {
        self.as_ref().report_failure(id, error).await
    }

    async fn report_completed(&self, processed: usize, not_found: usize, failed: usize) {
        self.as_ref()
            .report_completed(processed, not_found, failed)
            .await
    }
}

/// 全アイテムのバッチ処理を抽象化するトレイト
#[automock]
#[async_trait]
pub trait BatchProcessor: Send + Sync {
    /// 全アイテムを処理済みにし、成功したアイテムをID取得順で返す
    async fn process_all(&self) -> ProcessingResult<ProcessingReport>;

    /// サービス起動以降に処理に成功したアイテムの累計
    fn processed_count(&self) -> u64;
}

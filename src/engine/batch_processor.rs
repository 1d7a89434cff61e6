// ItemBatchProcessor - 全アイテムのファンアウト/ファンイン処理
//
// ID一覧のスナップショットを取り、1件1タスクでワーカープールに投入し、
// 全タスクの終了を待ってからID取得順に結果を集計する。

use super::job::JobHandle;
use super::worker_pool::WorkerPool;
use crate::core::{
    BatchProcessor, ProcessingConfig, ProcessingError, ProcessingReport, ProcessingResult,
    ProgressReporter, TaskOutcome,
};
use crate::services::processing::{process_single_item, OutcomeAggregator, ProcessedCounter};
use crate::storage::ItemStore;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

/// バッチ処理エンジン
///
/// 全ての依存関係はコンストラクタで注入する。共有する場合は
/// `Arc<ItemBatchProcessor>` でラップする。
pub struct ItemBatchProcessor<S, C, R> {
    store: Arc<S>,
    config: C,
    reporter: Arc<R>,
    pool: WorkerPool,
    counter: Arc<ProcessedCounter>,
}

impl<S, C, R> ItemBatchProcessor<S, C, R>
where
    S: ItemStore + 'static,
    C: ProcessingConfig + 'static,
    R: ProgressReporter + 'static,
{
    /// 新しい処理エンジンを作成
    ///
    /// 設定が不正な場合は `ConfigurationError` を返す
    pub fn new(store: Arc<S>, config: C, reporter: R) -> ProcessingResult<Self> {
        let pool = WorkerPool::from_config(&config)?;
        Ok(Self {
            store,
            config,
            reporter: Arc::new(reporter),
            pool,
            counter: Arc::new(ProcessedCounter::new()),
        })
    }

    /// 全アイテムを処理する
    ///
    /// ID一覧の取得に失敗した場合のみジョブ全体がエラーになる。
    /// 個別アイテムの失敗はレポートの診断情報とログに残る。
    pub async fn execute(&self) -> ProcessingResult<ProcessingReport> {
        let started_at = Utc::now();

        let ids = self.store.find_all_ids().await.map_err(|e| {
            error!(error = %e, "Failed to fetch item ids");
            ProcessingError::job_fetch(e)
        })?;

        let total_items = ids.len();
        self.reporter.report_started(total_items).await;

        if ids.is_empty() {
            self.reporter.report_completed(0, 0, 0).await;
            return Ok(ProcessingReport::empty(started_at));
        }

        // ファンアウト: 1アイテム1タスク
        let per_item_delay = self.config.per_item_delay();
        let mut pending = Vec::with_capacity(total_items);
        for id in ids {
            let store = Arc::clone(&self.store);
            let counter = Arc::clone(&self.counter);
            let submitted = self
                .pool
                .submit(async move {
                    process_single_item(store.as_ref(), id, &counter, per_item_delay).await
                })
                .await;
            pending.push((id, submitted));
        }

        // ファンイン: 投入順に全タスクの終了を待つ
        let mut aggregator = OutcomeAggregator::new(total_items);
        for (id, submitted) in pending {
            let outcome = match submitted {
                Ok(handle) => handle
                    .join()
                    .await
                    .unwrap_or_else(|error| TaskOutcome::Failure { id, error }),
                Err(error) => TaskOutcome::Failure { id, error },
            };

            match &outcome {
                TaskOutcome::NotFound { id } => self.reporter.report_not_found(*id).await,
                TaskOutcome::Failure { id, error } => {
                    self.reporter.report_failure(*id, &error.to_string()).await
                }
                TaskOutcome::Success(_) => {}
            }

            aggregator.record(outcome);
            if self.config.enable_progress_reporting() {
                self.reporter
                    .report_progress(aggregator.recorded(), total_items)
                    .await;
            }
        }

        let report = aggregator.finish(started_at);
        self.reporter
            .report_completed(
                report.processed_items,
                report.not_found_count,
                report.failure_count,
            )
            .await;
        info!(
            total = report.total_items,
            processed = report.processed_items,
            elapsed_ms = report.total_processing_time_ms,
            "Batch job finished"
        );

        Ok(report)
    }

    /// ジョブをバックグラウンドで開始し、すぐにハンドルを返す
    pub fn spawn_process_all(self: &Arc<Self>) -> JobHandle {
        JobHandle::spawn(Arc::clone(self))
    }

    /// 処理成功数の累計
    pub fn processed_count(&self) -> u64 {
        self.counter.get()
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait]
impl<S, C, R> BatchProcessor for ItemBatchProcessor<S, C, R>
where
    S: ItemStore + 'static,
    C: ProcessingConfig + 'static,
    R: ProgressReporter + 'static,
{
    async fn process_all(&self) -> ProcessingResult<ProcessingReport> {
        self.execute().await
    }

    fn processed_count(&self) -> u64 {
        self.counter.get()
    }
}

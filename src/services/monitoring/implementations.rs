// 進捗監視の具象実装

use crate::core::{ItemId, ProgressReporter};
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

/// tracingによる進捗報告実装
#[derive(Debug, Clone)]
pub struct TracingProgressReporter {
    quiet: bool,
    progress_interval: usize,
}

impl Default for TracingProgressReporter {
    fn default() -> Self {
        Self {
            quiet: false,
            progress_interval: 100,
        }
    }
}

impl TracingProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 開始・進捗・完了の報告を抑制する（失敗は常に記録する）
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }
}

#[async_trait]
impl ProgressReporter for TracingProgressReporter {
    async fn report_started(&self, total_items: usize) {
        if !self.quiet {
            info!(total_items, "Starting batch processing");
        }
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        if !self.quiet && (completed % self.progress_interval == 0 || completed == total) {
            let percentage = if total == 0 {
                100.0
            } else {
                (completed as f64 / total as f64) * 100.0
            };
            debug!(completed, total, "Progress: {percentage:.1}%");
        }
    }

    async fn report_not_found(&self, id: ItemId) {
        warn!(item_id = id, "Item not found at processing time");
    }

    async fn report_failure(&self, id: ItemId, error: &str) {
        error!(item_id = id, error, "Item processing failed");
    }

    async fn report_completed(&self, processed: usize, not_found: usize, failed: usize) {
        if !self.quiet {
            info!(processed, not_found, failed, "Batch processing completed");
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_items: usize) {}

    async fn report_progress(&self, _completed: usize, _total: usize) {}

    async fn report_not_found(&self, _id: ItemId) {}

    async fn report_failure(&self, _id: ItemId, _error: &str) {}

    async fn report_completed(&self, _processed: usize, _not_found: usize, _failed: usize) {}
}

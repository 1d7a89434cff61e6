// JobHandle - バックグラウンドで実行中のバッチジョブ

use crate::core::{BatchProcessor, ProcessingError, ProcessingReport, ProcessingResult};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// 非同期に開始したバッチジョブのハンドル
///
/// `wait` で全タスクの完了とレポートを待つ
#[derive(Debug)]
pub struct JobHandle {
    handle: JoinHandle<ProcessingResult<ProcessingReport>>,
}

impl JobHandle {
    /// ジョブを開始してすぐに戻る
    pub fn spawn<P>(processor: Arc<P>) -> Self
    where
        P: BatchProcessor + ?Sized + 'static,
    {
        let handle = tokio::spawn(async move { processor.process_all().await });
        Self { handle }
    }

    /// ジョブの完了を待つ
    ///
    /// ジョブ自体がパニックした場合は `TaskError` を返す
    pub async fn wait(self) -> ProcessingResult<ProcessingReport> {
        self.handle.await.map_err(ProcessingError::from)?
    }
}

// WorkerPool - 上限付きワーカープール
//
// 常駐ワーカー(core)が上限付きキューからタスクを取り出して実行する。
// キューが満杯になると max まで追加ワーカーを起動し、それでも空きがなければ
// 投入側が空きを待つ（タスクは捨てない）。

use crate::core::{ProcessingConfig, ProcessingError, ProcessingResult};
use crate::services::config::implementations::validate_pool_settings;
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// ワーカープールの設定値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub core_pool_size: usize,
    pub max_pool_size: usize,
    pub queue_capacity: usize,
    pub keep_alive: Duration,
}

impl PoolSettings {
    /// 設定から検証済みのプール設定を作成
    pub fn from_config<C: ProcessingConfig + ?Sized>(config: &C) -> ProcessingResult<Self> {
        validate_pool_settings(config)?;
        Ok(Self {
            core_pool_size: config.core_pool_size(),
            max_pool_size: config.max_pool_size(),
            queue_capacity: config.queue_capacity(),
            keep_alive: config.worker_keep_alive(),
        })
    }
}

/// 投入したタスクの結果を受け取るハンドル
#[derive(Debug)]
pub struct TaskHandle<T> {
    result_rx: oneshot::Receiver<T>,
}

impl<T> TaskHandle<T> {
    /// タスクの完了を待つ
    ///
    /// タスクがパニックした場合は `TaskExecutionError` になる
    pub async fn join(self) -> ProcessingResult<T> {
        self.result_rx
            .await
            .map_err(|_| ProcessingError::task_execution("task panicked before producing a result"))
    }
}

/// 上限付きワーカープール
pub struct WorkerPool {
    settings: PoolSettings,
    queue_tx: Mutex<Option<mpsc::Sender<Job>>>,
    queue_rx: Arc<tokio::sync::Mutex<mpsc::Receiver<Job>>>,
    active_workers: Arc<AtomicUsize>,
    next_worker_id: AtomicUsize,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// 新しいプールを作成
    ///
    /// ワーカーは最初のタスク投入時に起動するため、ランタイム外でも作成できる
    pub fn new(settings: PoolSettings) -> Self {
        let (queue_tx, queue_rx) = mpsc::channel::<Job>(settings.queue_capacity.max(1));
        Self {
            settings,
            queue_tx: Mutex::new(Some(queue_tx)),
            queue_rx: Arc::new(tokio::sync::Mutex::new(queue_rx)),
            active_workers: Arc::new(AtomicUsize::new(0)),
            next_worker_id: AtomicUsize::new(0),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// 設定から作成
    pub fn from_config<C: ProcessingConfig + ?Sized>(config: &C) -> ProcessingResult<Self> {
        Ok(Self::new(PoolSettings::from_config(config)?))
    }

    /// 現在稼働中のワーカー数
    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::Acquire)
    }

    /// キューで待機中のタスク数
    pub fn queued_tasks(&self) -> usize {
        self.queue_tx
            .lock()
            .as_ref()
            .map(|tx| tx.max_capacity() - tx.capacity())
            .unwrap_or(0)
    }

    /// タスクを投入する
    ///
    /// キューとワーカーが両方とも上限に達している場合は空きが出るまで待機する
    pub async fn submit<F, T>(&self, task: F) -> ProcessingResult<TaskHandle<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let queue_tx = self
            .queue_tx
            .lock()
            .clone()
            .ok_or_else(|| ProcessingError::worker_pool("pool is shut down"))?;

        let (result_tx, result_rx) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let output = task.await;
            // 受信側が破棄されていても結果は捨ててよい
            let _ = result_tx.send(output);
        });

        self.ensure_core_workers();

        let job = match queue_tx.try_send(job) {
            Ok(()) => return Ok(TaskHandle { result_rx }),
            Err(mpsc::error::TrySendError::Full(job)) => job,
            Err(mpsc::error::TrySendError::Closed(_)) => {
                return Err(ProcessingError::worker_pool("task queue is closed"))
            }
        };

        // キュー満杯: 上限まで追加ワーカーを起動してから空きを待つ
        self.try_spawn_worker(self.settings.max_pool_size, Some(self.settings.keep_alive));
        queue_tx
            .send(job)
            .await
            .map_err(|_| ProcessingError::worker_pool("task queue is closed"))?;

        Ok(TaskHandle { result_rx })
    }

    /// 新規投入を締め切り、キュー内のタスク完了とワーカー終了を待つ
    pub async fn shutdown(&self) {
        drop(self.queue_tx.lock().take());

        let handles = std::mem::take(&mut *self.handles.lock());
        for handle in handles {
            if let Err(error) = handle.await {
                warn!(%error, "Worker terminated abnormally");
            }
        }
    }

    fn ensure_core_workers(&self) {
        while self.try_spawn_worker(self.settings.core_pool_size, None) {}
    }

    /// 稼働数が `limit` 未満ならワーカーを1つ起動する
    fn try_spawn_worker(&self, limit: usize, keep_alive: Option<Duration>) -> bool {
        let reserved = self
            .active_workers
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |active| {
                (active < limit).then_some(active + 1)
            })
            .is_ok();
        if !reserved {
            return false;
        }

        let worker_id = self.next_worker_id.fetch_add(1, Ordering::Relaxed);
        let handle = tokio::spawn(run_worker(
            worker_id,
            Arc::clone(&self.queue_rx),
            WorkerSlot(Arc::clone(&self.active_workers)),
            keep_alive,
        ));

        let mut handles = self.handles.lock();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
        true
    }
}

/// ワーカー本体
///
/// `keep_alive` が指定された追加ワーカーは、その時間タスクが来なければ終了する
async fn run_worker(
    worker_id: usize,
    queue_rx: Arc<tokio::sync::Mutex<mpsc::Receiver<Job>>>,
    _slot: WorkerSlot,
    keep_alive: Option<Duration>,
) {
    debug!(worker_id, extra = keep_alive.is_some(), "Worker started");

    loop {
        // 次の作業を取得
        let next = async { queue_rx.lock().await.recv().await };
        let job = match keep_alive {
            None => next.await,
            // ロック待ちも含めてアイドル時間とみなす
            Some(idle) => tokio::time::timeout(idle, next).await.ok().flatten(),
        };

        let Some(job) = job else {
            break;
        };

        // パニックを他のタスクに波及させないため別タスクで実行する
        if let Err(error) = tokio::spawn(job).await {
            warn!(worker_id, %error, "Task panicked inside worker");
        }
    }

    debug!(worker_id, "Worker stopped");
}

/// 稼働ワーカー数の予約枠
///
/// 予約時に作成してワーカーのフューチャーに持たせるので、ランタイム停止などで
/// 未実行のまま破棄された場合も枠が返る
struct WorkerSlot(Arc<AtomicUsize>);

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

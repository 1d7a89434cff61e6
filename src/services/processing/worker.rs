// Worker - 単一アイテム処理機能

use super::counter::ProcessedCounter;
use crate::core::{ItemId, ProcessingError, TaskOutcome};
use crate::storage::ItemStore;
use std::time::Duration;
use tracing::debug;

/// 単一アイテムの処理
///
/// 取得 → ステータス更新 → 保存 の順に行い、保存が成功した後にだけ
/// カウンターを加算する。失敗は全て `TaskOutcome` として返す。
pub async fn process_single_item<S>(
    store: &S,
    id: ItemId,
    counter: &ProcessedCounter,
    per_item_delay: Duration,
) -> TaskOutcome
where
    S: ItemStore + ?Sized,
{
    // I/O待ちを模した固定遅延
    if !per_item_delay.is_zero() {
        tokio::time::sleep(per_item_delay).await;
    }

    let mut item = match store.find_by_id(id).await {
        Ok(Some(item)) => item,
        Ok(None) => return TaskOutcome::NotFound { id },
        Err(error) => {
            return TaskOutcome::Failure {
                id,
                error: ProcessingError::task_execution(format!("lookup failed: {error:#}")),
            }
        }
    };

    item.mark_processed();

    match store.save(item).await {
        Ok(saved) => {
            let total = counter.increment();
            debug!(item_id = id, processed_total = total, "Item processed");
            TaskOutcome::Success(saved)
        }
        Err(error) => TaskOutcome::Failure {
            id,
            error: ProcessingError::item_persist(id, error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Item;
    use crate::storage::{memory::InMemoryItemStore, MockItemStore};
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_process_existing_item() {
        let store = InMemoryItemStore::with_items(vec![Item::new("Item 1", "Desc", "NEW", "a@b.com")])
            .await
            .unwrap();
        let counter = ProcessedCounter::new();

        let outcome = process_single_item(&store, 1, &counter, Duration::ZERO).await;

        match outcome {
            TaskOutcome::Success(item) => {
                assert_eq!(item.id, Some(1));
                assert!(item.is_processed());
            }
            other => panic!("Expected success, got {other:?}"),
        }
        assert_eq!(counter.get(), 1);

        // 永続化された状態も処理済みになっていることを確認
        let stored = store.find_by_id(1).await.unwrap().unwrap();
        assert!(stored.is_processed());
    }

    #[tokio::test]
    async fn test_missing_item_is_not_counted() {
        let store = InMemoryItemStore::new();
        let counter = ProcessedCounter::new();

        let outcome = process_single_item(&store, 42, &counter, Duration::ZERO).await;

        assert!(matches!(outcome, TaskOutcome::NotFound { id: 42 }));
        assert_eq!(counter.get(), 0);
    }

    #[tokio::test]
    async fn test_persist_failure_is_not_counted() {
        let mut mock_store = MockItemStore::new();
        mock_store
            .expect_find_by_id()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(Some(Item::new("Item 1", "Desc", "NEW", "a@b.com").with_id(id))));
        mock_store
            .expect_save()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("disk full")));
        let counter = ProcessedCounter::new();

        let outcome = process_single_item(&mock_store, 1, &counter, Duration::ZERO).await;

        match outcome {
            TaskOutcome::Failure { id, error } => {
                assert_eq!(id, 1);
                assert!(matches!(error, ProcessingError::ItemPersistError { id: 1, .. }));
                assert!(error.to_string().contains("disk full"));
            }
            other => panic!("Expected failure, got {other:?}"),
        }
        assert_eq!(counter.get(), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_becomes_task_failure() {
        let mut mock_store = MockItemStore::new();
        mock_store
            .expect_find_by_id()
            .returning(|_| Err(anyhow::anyhow!("connection reset")));
        mock_store.expect_save().never();
        let counter = ProcessedCounter::new();

        let outcome = process_single_item(&mock_store, 5, &counter, Duration::ZERO).await;

        match outcome {
            TaskOutcome::Failure { id, error } => {
                assert_eq!(id, 5);
                assert!(matches!(error, ProcessingError::TaskExecutionError { .. }));
                assert!(error.to_string().contains("connection reset"));
            }
            other => panic!("Expected failure, got {other:?}"),
        }
        assert_eq!(counter.get(), 0);
    }

    #[tokio::test]
    async fn test_per_item_delay_is_applied() {
        let store = InMemoryItemStore::with_items(vec![Item::new("Item", "Desc", "NEW", "a@b.com")])
            .await
            .unwrap();
        let counter = ProcessedCounter::new();

        let start = std::time::Instant::now();
        let outcome = process_single_item(&store, 1, &counter, Duration::from_millis(20)).await;

        assert!(outcome.is_success());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}

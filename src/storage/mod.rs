use crate::core::{Item, ItemId};
use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;

pub mod memory;

#[cfg(test)]
pub mod test_mocks;

/// アイテムストアのトレイト
///
/// 同一アイテムへの並行アクセスは実装側で安全に直列化されることを前提とする
#[automock]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// 全アイテムを取得
    async fn find_all(&self) -> Result<Vec<Item>>;

    /// IDでアイテムを取得
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>>;

    /// 全アイテムのIDを取得（この時点のスナップショット）
    async fn find_all_ids(&self) -> Result<Vec<ItemId>>;

    /// アイテムを保存する。IDがなければ採番する
    ///
    /// IDを持つアイテムは既存レコードの更新のみで、存在しなければエラーを返す
    async fn save(&self, item: Item) -> Result<Item>;

    /// アイテムを削除する
    async fn delete_by_id(&self, id: ItemId) -> Result<()>;

    /// アイテムが存在するかチェック
    async fn exists_by_id(&self, id: ItemId) -> Result<bool>;
}

// ItemStore for Box<dyn ItemStore>
#[async_trait]
impl ItemStore for Box<dyn ItemStore> {
    async fn find_all(&self) -> Result<Vec<Item>> {
        self.as_ref().find_all().await
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        self.as_ref().find_by_id(id).await
    }

    async fn find_all_ids(&self) -> Result<Vec<ItemId>> {
        self.as_ref().find_all_ids().await
    }

    async fn save(&self, item: Item) -> Result<Item> {
        self.as_ref().save(item).await
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<()> {
        self.as_ref().delete_by_id(id).await
    }

    async fn exists_by_id(&self, id: ItemId) -> Result<bool> {
        self.as_ref().exists_by_id(id).await
    }
}

// ItemStore for Arc<S>
#[async_trait]
impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    async fn find_all(&self) -> Result<Vec<Item>> {
        self.as_ref().find_all().await
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        self.as_ref().find_by_id(id).await
    }

    async fn find_all_ids(&self) -> Result<Vec<ItemId>> {
        self.as_ref().find_all_ids().await
    }

    async fn save(&self, item: Item) -> Result<Item> {
        self.as_ref().save(item).await
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<()> {
        self.as_ref().delete_by_id(id).await
    }

    async fn exists_by_id(&self, id: ItemId) -> Result<bool> {
        self.as_ref().exists_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_boxed_store_delegates_to_mock() {
        let mut mock_store = MockItemStore::new();
        mock_store
            .expect_find_all_ids()
            .times(1)
            .returning(|| Ok(vec![1, 2]));
        mock_store
            .expect_find_by_id()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(Some(Item::new("Item 1", "Desc", "NEW", "a@b.com").with_id(id))));
        mock_store
            .expect_exists_by_id()
            .with(eq(99))
            .times(1)
            .returning(|_| Ok(false));

        let store: Box<dyn ItemStore> = Box::new(mock_store);

        assert_eq!(store.find_all_ids().await.unwrap(), vec![1, 2]);
        let item = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(item.id, Some(1));
        assert!(!store.exists_by_id(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_arc_store_delegates() {
        let store = Arc::new(memory::InMemoryItemStore::new());
        let saved = store
            .save(Item::new("Item", "Desc", "NEW", "a@b.com"))
            .await
            .unwrap();

        let shared: Arc<memory::InMemoryItemStore> = Arc::clone(&store);
        assert!(shared.exists_by_id(saved.id.unwrap()).await.unwrap());
    }
}

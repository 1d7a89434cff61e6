// ItemService - HTTP層から使うCRUDファサード

use super::validation::validate_item;
use crate::core::{Item, ItemId, ProcessingError, ProcessingResult};
use crate::storage::ItemStore;
use tracing::{debug, info};

/// アイテムのCRUD操作
///
/// ストアのエラーは `StoreError` に変換して返す
pub struct ItemService<S> {
    store: S,
}

impl<S: ItemStore> ItemService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> ProcessingResult<Vec<Item>> {
        self.store.find_all().await.map_err(ProcessingError::store)
    }

    pub async fn find_by_id(&self, id: ItemId) -> ProcessingResult<Option<Item>> {
        self.store
            .find_by_id(id)
            .await
            .map_err(ProcessingError::store)
    }

    pub async fn exists_by_id(&self, id: ItemId) -> ProcessingResult<bool> {
        self.store
            .exists_by_id(id)
            .await
            .map_err(ProcessingError::store)
    }

    /// 新規作成
    ///
    /// クライアントが指定したIDは無視してストアに採番させる
    pub async fn create(&self, mut item: Item) -> ProcessingResult<Item> {
        validate_item(&item)?;
        item.id = None;

        let saved = self.store.save(item).await.map_err(ProcessingError::store)?;
        info!(id = ?saved.id, "Item created");
        Ok(saved)
    }

    /// 部分更新。指定されたフィールドだけを既存値に上書きする
    pub async fn update(&self, id: ItemId, update: Item) -> ProcessingResult<Item> {
        validate_item(&update)?;

        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProcessingError::item_not_found(id))?;
        existing.merge_from(update);
        existing.id = Some(id);

        let saved = self
            .store
            .save(existing)
            .await
            .map_err(ProcessingError::store)?;
        debug!(id, "Item updated");
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: ItemId) -> ProcessingResult<()> {
        if !self.exists_by_id(id).await? {
            return Err(ProcessingError::item_not_found(id));
        }
        self.store
            .delete_by_id(id)
            .await
            .map_err(ProcessingError::store)?;
        info!(id, "Item deleted");
        Ok(())
    }
}

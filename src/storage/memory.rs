use super::ItemStore;
use crate::core::{Item, ItemId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// メモリ内に保持するアイテムストア
///
/// クローンしても同じデータを共有する
#[derive(Debug, Clone)]
pub struct InMemoryItemStore {
    items: Arc<RwLock<BTreeMap<ItemId, Item>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// 初期データ付きでストアを作成
    ///
    /// IDを持つアイテムはそのIDで登録し、持たないアイテムには保存順に採番する
    pub async fn with_items(items: Vec<Item>) -> Result<Self> {
        let store = Self::new();
        {
            let mut map = store.items.write().await;
            for mut item in items {
                let id = match item.id {
                    Some(id) => {
                        store.observe_id(id);
                        id
                    }
                    None => store.allocate_id(),
                };
                item.id = Some(id);
                map.insert(id, item);
            }
        }
        Ok(store)
    }

    /// JSON配列ファイルから初期データを読み込む
    pub async fn load_from_json_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
        let items: Vec<Item> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse seed file: {}", path.display()))?;
        Self::with_items(items).await
    }

    /// 保存されているアイテム数
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn allocate_id(&self) -> ItemId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    // 初期データのIDと採番が衝突しないよう進める
    fn observe_id(&self, id: ItemId) {
        self.next_id.fetch_max(id.saturating_add(1), Ordering::Relaxed);
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn find_all(&self) -> Result<Vec<Item>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn find_all_ids(&self) -> Result<Vec<ItemId>> {
        Ok(self.items.read().await.keys().copied().collect())
    }

    async fn save(&self, mut item: Item) -> Result<Item> {
        let mut items = self.items.write().await;
        match item.id {
            // 削除済みのアイテムを復活させない
            Some(id) => match items.get_mut(&id) {
                Some(existing) => *existing = item.clone(),
                None => anyhow::bail!("item {id} does not exist"),
            },
            None => {
                let id = self.allocate_id();
                item.id = Some(id);
                items.insert(id, item.clone());
            }
        }
        Ok(item)
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<()> {
        self.items.write().await.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: ItemId) -> Result<bool> {
        Ok(self.items.read().await.contains_key(&id))
    }
}

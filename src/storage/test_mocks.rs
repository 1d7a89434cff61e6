// テスト用のストア実装
// 遅延や保存失敗を注入できる InMemoryItemStore のラッパー

use super::{memory::InMemoryItemStore, ItemStore};
use crate::core::{Item, ItemId};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub struct FaultInjectingItemStore {
    inner: InMemoryItemStore,
    lookup_delays: HashMap<ItemId, Duration>,
    failing_saves: HashSet<ItemId>,
    deleted_after_lookup: HashSet<ItemId>,
    fail_id_listing: bool,
    save_calls: AtomicUsize,
}

impl FaultInjectingItemStore {
    pub fn new(inner: InMemoryItemStore) -> Self {
        Self {
            inner,
            lookup_delays: HashMap::new(),
            failing_saves: HashSet::new(),
            deleted_after_lookup: HashSet::new(),
            fail_id_listing: false,
            save_calls: AtomicUsize::new(0),
        }
    }

    /// 指定IDの取得を遅らせる
    pub fn with_lookup_delay(mut self, id: ItemId, delay: Duration) -> Self {
        self.lookup_delays.insert(id, delay);
        self
    }

    /// 指定IDの保存を失敗させる
    pub fn with_failing_save(mut self, id: ItemId) -> Self {
        self.failing_saves.insert(id);
        self
    }

    /// 指定IDを取得直後に削除する（取得と保存の間の並行削除を再現）
    pub fn with_delete_after_lookup(mut self, id: ItemId) -> Self {
        self.deleted_after_lookup.insert(id);
        self
    }

    /// ID一覧の取得を失敗させる
    pub fn with_failing_id_listing(mut self) -> Self {
        self.fail_id_listing = true;
        self
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &InMemoryItemStore {
        &self.inner
    }
}

#[async_trait]
impl ItemStore for FaultInjectingItemStore {
    async fn find_all(&self) -> Result<Vec<Item>> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        if let Some(delay) = self.lookup_delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }
        let found = self.inner.find_by_id(id).await?;
        if self.deleted_after_lookup.contains(&id) {
            self.inner.delete_by_id(id).await?;
        }
        Ok(found)
    }

    async fn find_all_ids(&self) -> Result<Vec<ItemId>> {
        if self.fail_id_listing {
            anyhow::bail!("item table is unavailable");
        }
        self.inner.find_all_ids().await
    }

    async fn save(&self, item: Item) -> Result<Item> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = item.id {
            if self.failing_saves.contains(&id) {
                anyhow::bail!("write rejected for item {id}");
            }
        }
        self.inner.save(item).await
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<()> {
        self.inner.delete_by_id(id).await
    }

    async fn exists_by_id(&self, id: ItemId) -> Result<bool> {
        self.inner.exists_by_id(id).await
    }
}

// 統合テスト用の共通ヘルパー
#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use item_processor::{DefaultProcessingConfig, InMemoryItemStore, Item, ItemId, ItemStore};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub fn seed_items(count: usize) -> Vec<Item> {
    (1..=count)
        .map(|i| {
            Item::new(
                format!("Item {i}"),
                format!("Description {i}"),
                "NEW",
                format!("item{i}@test.com"),
            )
        })
        .collect()
}

pub async fn seeded_store(count: usize) -> Arc<InMemoryItemStore> {
    Arc::new(InMemoryItemStore::with_items(seed_items(count)).await.unwrap())
}

/// 遅延なし・小さいプールの設定
pub fn fast_config() -> DefaultProcessingConfig {
    DefaultProcessingConfig::default()
        .with_core_pool_size(5)
        .with_max_pool_size(10)
        .with_queue_capacity(20)
        .with_per_item_delay(Duration::ZERO)
        .with_progress_reporting(false)
}

pub fn write_seed_file(dir: &Path, items: &[Item]) -> PathBuf {
    let path = dir.join("items.json");
    std::fs::write(&path, serde_json::to_string_pretty(items).unwrap()).unwrap();
    path
}

pub fn ids(items: &[Item]) -> Vec<ItemId> {
    items.iter().filter_map(|item| item.id).collect()
}

/// 障害を仕込めるストア
pub struct ScriptedStore {
    inner: InMemoryItemStore,
    lookup_delays: HashMap<ItemId, Duration>,
    failing_saves: HashSet<ItemId>,
    failing_lookups: HashSet<ItemId>,
    unavailable: bool,
}

impl ScriptedStore {
    pub fn new(inner: InMemoryItemStore) -> Self {
        Self {
            inner,
            lookup_delays: HashMap::new(),
            failing_saves: HashSet::new(),
            failing_lookups: HashSet::new(),
            unavailable: false,
        }
    }

    pub fn delay_lookup(mut self, id: ItemId, delay: Duration) -> Self {
        self.lookup_delays.insert(id, delay);
        self
    }

    pub fn fail_save(mut self, id: ItemId) -> Self {
        self.failing_saves.insert(id);
        self
    }

    pub fn fail_lookup(mut self, id: ItemId) -> Self {
        self.failing_lookups.insert(id);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn inner(&self) -> &InMemoryItemStore {
        &self.inner
    }
}

#[async_trait]
impl ItemStore for ScriptedStore {
    async fn find_all(&self) -> Result<Vec<Item>> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        if let Some(delay) = self.lookup_delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_lookups.contains(&id) {
            anyhow::bail!("lookup timed out for item {id}");
        }
        self.inner.find_by_id(id).await
    }

    async fn find_all_ids(&self) -> Result<Vec<ItemId>> {
        if self.unavailable {
            anyhow::bail!("database is down");
        }
        self.inner.find_all_ids().await
    }

    async fn save(&self, item: Item) -> Result<Item> {
        if item.id.is_some_and(|id| self.failing_saves.contains(&id)) {
            anyhow::bail!("constraint violation");
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

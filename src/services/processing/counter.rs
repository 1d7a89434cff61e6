// ProcessedCounter - 処理成功数の累計カウンター

use std::sync::atomic::{AtomicU64, Ordering};

/// サービス全体で共有する処理成功数カウンター
///
/// 単調増加のみ。並行にインクリメントされても取りこぼさない
#[derive(Debug, Default)]
pub struct ProcessedCounter {
    count: AtomicU64,
}

impl ProcessedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1件分加算し、加算後の値を返す
    pub fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }
}

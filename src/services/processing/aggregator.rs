// Aggregator - タスク結果の集計機能

use crate::core::types::elapsed_ms;
use crate::core::{FailureKind, Item, ItemFailure, ItemId, ProcessingReport, TaskOutcome};
use chrono::{DateTime, Utc};

/// タスク結果を投入順に集計する
///
/// `record` はID取得順に呼ばれる前提で、成功アイテムはその順序のまま保持する
#[derive(Debug)]
pub struct OutcomeAggregator {
    total_items: usize,
    items: Vec<Item>,
    not_found_count: usize,
    failures: Vec<ItemFailure>,
}

impl OutcomeAggregator {
    pub fn new(total_items: usize) -> Self {
        Self {
            total_items,
            items: Vec::with_capacity(total_items),
            not_found_count: 0,
            failures: Vec::new(),
        }
    }

    /// 1件分の結果を消費して記録する
    pub fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Success(item) => self.items.push(item),
            TaskOutcome::NotFound { id } => {
                self.not_found_count += 1;
                self.failures.push(ItemFailure {
                    id,
                    kind: FailureKind::NotFound,
                    message: format!("item {id} no longer exists"),
                });
            }
            TaskOutcome::Failure { id, error } => self.failures.push(ItemFailure {
                id,
                kind: error.kind(),
                message: error.to_string(),
            }),
        }
    }

    /// 記録済みの件数
    pub fn recorded(&self) -> usize {
        self.items.len() + self.failures.len()
    }

    pub fn processed_count(&self) -> usize {
        self.items.len()
    }

    pub fn failed_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.failures.iter().map(|failure| failure.id)
    }

    /// レポートを作成する
    pub fn finish(self, started_at: DateTime<Utc>) -> ProcessingReport {
        let finished_at = Utc::now();
        let processed_items = self.items.len();
        let failure_count = self.failures.len() - self.not_found_count;

        ProcessingReport {
            items: self.items,
            total_items: self.total_items,
            processed_items,
            not_found_count: self.not_found_count,
            failure_count,
            failures: self.failures,
            started_at,
            finished_at,
            total_processing_time_ms: elapsed_ms(started_at, finished_at),
        }
    }
}

// 処理に関連するデータ型定義

use super::error::{FailureKind, ProcessingError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// アイテム識別子（ストアが採番する）
pub type ItemId = i64;

/// 処理済みを表すステータス値
pub const STATUS_PROCESSED: &str = "PROCESSED";

/// アイテムレコード
///
/// `id` は保存前は `None`。それ以外のフィールドも部分更新の入力として
/// 使うため全て省略可能。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// 連絡先メールアドレス（入力時は `contact` も受け付ける）
    #[serde(default, alias = "contact")]
    pub email: Option<String>,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            description: Some(description.into()),
            status: Some(status.into()),
            email: Some(email.into()),
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// ステータスを処理済みに変更
    pub fn mark_processed(&mut self) {
        self.status = Some(STATUS_PROCESSED.to_string());
    }

    pub fn is_processed(&self) -> bool {
        self.status.as_deref() == Some(STATUS_PROCESSED)
    }

    /// `Some` のフィールドだけを上書きする部分更新
    pub fn merge_from(&mut self, update: Item) {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(status) = update.status {
            self.status = Some(status);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
    }
}

/// 個別タスクの結果
///
/// タスク完了時に生成され、ジョブの集計で一度だけ消費される
#[derive(Debug)]
pub enum TaskOutcome {
    Success(Item),
    NotFound { id: ItemId },
    Failure { id: ItemId, error: ProcessingError },
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// 成功しなかったアイテムの診断情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFailure {
    pub id: ItemId,
    pub kind: FailureKind,
    pub message: String,
}

/// バッチ処理全体のレポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingReport {
    /// 成功したアイテム（ID取得順）
    pub items: Vec<Item>,
    pub total_items: usize,
    pub processed_items: usize,
    pub not_found_count: usize,
    pub failure_count: usize,
    pub failures: Vec<ItemFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_processing_time_ms: u64,
}

impl ProcessingReport {
    /// 処理対象がない場合の空レポート
    pub fn empty(started_at: DateTime<Utc>) -> Self {
        let finished_at = Utc::now();
        Self {
            items: Vec::new(),
            total_items: 0,
            processed_items: 0,
            not_found_count: 0,
            failure_count: 0,
            failures: Vec::new(),
            started_at,
            finished_at,
            total_processing_time_ms: elapsed_ms(started_at, finished_at),
        }
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// 全てのアイテムが成功したかどうか
    pub fn is_complete_success(&self) -> bool {
        self.processed_items == self.total_items
    }
}

pub(crate) fn elapsed_ms(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> u64 {
    (finished_at - started_at).num_milliseconds().max(0) as u64
}

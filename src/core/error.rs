// Custom error types for item processing
// バッチ処理とCRUD操作のカスタムエラー型定義

use super::types::ItemId;
use thiserror::Error;

/// アイテム処理固有のエラー型
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// ID一覧が取得できない場合。ジョブ全体が失敗する唯一のエラー
    #[error("ジョブ取得エラー: {source}")]
    JobFetchError {
        #[source]
        source: anyhow::Error,
    },

    #[error("アイテムが見つかりません: {id}")]
    ItemNotFound { id: ItemId },

    #[error("アイテム永続化エラー: {id} - {source}")]
    ItemPersistError {
        id: ItemId,
        #[source]
        source: anyhow::Error,
    },

    #[error("タスク実行エラー: {message}")]
    TaskExecutionError { message: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("ワーカープールエラー: {message}")]
    WorkerPoolError { message: String },

    #[error("ストアエラー: {source}")]
    StoreError {
        #[source]
        source: anyhow::Error,
    },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("バリデーションエラー: {field} - {reason}")]
    ValidationError { field: String, reason: String },
}

impl ProcessingError {
    /// ジョブ取得エラーの作成
    pub fn job_fetch(source: anyhow::Error) -> Self {
        Self::JobFetchError { source }
    }

    /// アイテム未検出エラーの作成
    pub fn item_not_found(id: ItemId) -> Self {
        Self::ItemNotFound { id }
    }

    /// 永続化エラーの作成
    pub fn item_persist(id: ItemId, source: anyhow::Error) -> Self {
        Self::ItemPersistError { id, source }
    }

    /// タスク実行エラーの作成
    pub fn task_execution(message: impl Into<String>) -> Self {
        Self::TaskExecutionError {
            message: message.into(),
        }
    }

    /// ワーカープールエラーの作成
    pub fn worker_pool(message: impl Into<String>) -> Self {
        Self::WorkerPoolError {
            message: message.into(),
        }
    }

    /// ストアエラーの作成
    pub fn store(source: anyhow::Error) -> Self {
        Self::StoreError { source }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// バリデーションエラーの作成
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 診断用の分類名を取得
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::JobFetchError { .. } => FailureKind::JobFetch,
            Self::ItemNotFound { .. } => FailureKind::NotFound,
            Self::ItemPersistError { .. } => FailureKind::Persist,
            Self::TaskExecutionError { .. }
            | Self::TaskError { .. }
            | Self::WorkerPoolError { .. }
            | Self::StoreError { .. } => FailureKind::TaskExecution,
            Self::ConfigurationError { .. } => FailureKind::Configuration,
            Self::ValidationError { .. } => FailureKind::Validation,
        }
    }

    /// ジョブ全体を失敗させるエラーかどうか
    ///
    /// 設定エラーはジョブ開始前の構築時に返るので含めない
    pub fn is_fatal_to_job(&self) -> bool {
        matches!(self, Self::JobFetchError { .. })
    }
}

/// エラー分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    JobFetch,
    NotFound,
    Persist,
    TaskExecution,
    Configuration,
    Validation,
}

impl FailureKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JobFetch => "job_fetch",
            Self::NotFound => "not_found",
            Self::Persist => "persist",
            Self::TaskExecution => "task_execution",
            Self::Configuration => "configuration",
            Self::Validation => "validation",
        }
    }
}

/// アイテム処理の結果型
pub type ProcessingResult<T> = std::result::Result<T, ProcessingError>;

impl From<tokio::task::JoinError> for ProcessingError {
    fn from(error: tokio::task::JoinError) -> Self {
        ProcessingError::TaskError { source: error }
    }
}

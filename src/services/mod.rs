// サービス層 - 機能別のビジネスロジック
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod config;
pub mod items;
pub mod monitoring;
pub mod processing;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{ConfigPreset, DefaultProcessingConfig, ServerConfig};
pub use items::ItemService;
pub use monitoring::{NoOpProgressReporter, TracingProgressReporter};
pub use processing::{process_single_item, OutcomeAggregator, ProcessedCounter};

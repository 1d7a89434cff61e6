// アイテム処理機能
// 単一アイテムの取得・更新・保存、処理成功数の累計、結果の集計

pub mod aggregator;
pub mod counter;
pub mod worker;

// 公開API
pub use aggregator::OutcomeAggregator;
pub use counter::ProcessedCounter;
pub use worker::process_single_item;

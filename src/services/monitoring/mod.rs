// 進捗監視機能
// 処理進捗の報告、未検出・失敗の通知、完了通知

pub mod implementations;

// 公開API
pub use implementations::{NoOpProgressReporter, TracingProgressReporter};

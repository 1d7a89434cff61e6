// 設定管理機能
// ワーカープール設定、プリセット、サーバー設定

pub mod implementations;

// 公開API
pub use implementations::{ConfigPreset, DefaultProcessingConfig, ServerConfig};

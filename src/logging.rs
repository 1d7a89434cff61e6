// ログ初期化

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// `-v` の回数に応じた既定のログレベル
pub fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// tracingサブスクライバーを初期化する
///
/// `RUST_LOG` が設定されていればそちらを優先する
pub fn init_logging(verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

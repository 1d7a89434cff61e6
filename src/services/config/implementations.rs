// 設定管理の具象実装

use crate::core::{ProcessingConfig, ProcessingError, ProcessingResult};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CORE_POOL_SIZE: usize = 5;
const DEFAULT_MAX_POOL_SIZE: usize = 10;
const DEFAULT_QUEUE_CAPACITY: usize = 20;
const DEFAULT_PER_ITEM_DELAY: Duration = Duration::from_millis(100);
const DEFAULT_WORKER_KEEP_ALIVE: Duration = Duration::from_secs(60);

/// 設定プリセット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    Default,
    HighPerformance,
    Testing,
}

impl FromStr for ConfigPreset {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "high_performance" | "high-performance" => Ok(Self::HighPerformance),
            "testing" => Ok(Self::Testing),
            other => Err(ProcessingError::configuration(format!(
                "未サポートのプリセット: {other}. 利用可能: default, high_performance, testing"
            ))),
        }
    }
}

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultProcessingConfig {
    core_pool_size: usize,
    max_pool_size: usize,
    queue_capacity: usize,
    per_item_delay: Duration,
    worker_keep_alive: Duration,
    enable_progress: bool,
}

impl DefaultProcessingConfig {
    /// プリセットから設定を作成
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::HighPerformance => {
                let cpu_count = num_cpus::get().max(1);
                Self::default()
                    .with_core_pool_size(cpu_count * 2)
                    .with_max_pool_size(cpu_count * 4)
                    .with_queue_capacity(256)
            }
            ConfigPreset::Testing => Self::default()
                .with_core_pool_size(2)
                .with_max_pool_size(4)
                .with_queue_capacity(8)
                .with_per_item_delay(Duration::ZERO)
                .with_worker_keep_alive(Duration::from_millis(100))
                .with_progress_reporting(false),
        }
    }

    pub fn with_core_pool_size(mut self, core_pool_size: usize) -> Self {
        self.core_pool_size = core_pool_size;
        self
    }

    pub fn with_max_pool_size(mut self, max_pool_size: usize) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn with_per_item_delay(mut self, delay: Duration) -> Self {
        self.per_item_delay = delay;
        self
    }

    pub fn with_worker_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.worker_keep_alive = keep_alive;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }

    /// 設定値の検証
    pub fn validate(&self) -> ProcessingResult<()> {
        validate_pool_settings(self)
    }
}

impl Default for DefaultProcessingConfig {
    fn default() -> Self {
        Self {
            core_pool_size: DEFAULT_CORE_POOL_SIZE,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            per_item_delay: DEFAULT_PER_ITEM_DELAY,
            worker_keep_alive: DEFAULT_WORKER_KEEP_ALIVE,
            enable_progress: true,
        }
    }
}

impl ProcessingConfig for DefaultProcessingConfig {
    fn core_pool_size(&self) -> usize {
        self.core_pool_size
    }

    fn max_pool_size(&self) -> usize {
        self.max_pool_size
    }

    fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    fn per_item_delay(&self) -> Duration {
        self.per_item_delay
    }

    fn worker_keep_alive(&self) -> Duration {
        self.worker_keep_alive
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// ワーカープール設定の検証
pub fn validate_pool_settings<C: ProcessingConfig + ?Sized>(config: &C) -> ProcessingResult<()> {
    if config.core_pool_size() == 0 {
        return Err(ProcessingError::configuration(
            "常駐ワーカー数は1以上である必要があります",
        ));
    }
    if config.max_pool_size() < config.core_pool_size() {
        return Err(ProcessingError::configuration(
            "最大ワーカー数は常駐ワーカー数以上である必要があります",
        ));
    }
    if config.queue_capacity() == 0 {
        return Err(ProcessingError::configuration(
            "キュー容量は1以上である必要があります",
        ));
    }
    Ok(())
}

/// HTTPサーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

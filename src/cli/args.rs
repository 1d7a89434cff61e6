use crate::core::ProcessingResult;
use crate::services::{ConfigPreset, DefaultProcessingConfig};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "item_processor")]
#[command(about = "Item CRUD service with a concurrent batch processor")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind host
        #[arg(long, env = "ITEMS_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Bind port
        #[arg(long, env = "ITEMS_PORT", default_value_t = 8080)]
        port: u16,

        /// JSON file with initial items
        #[arg(short, long, env = "ITEMS_SEED_FILE")]
        seed: Option<PathBuf>,

        #[command(flatten)]
        pool: PoolArgs,
    },

    /// Run one batch job over a seed file and print the report
    Process {
        /// JSON file with the items to process
        seed: PathBuf,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        pool: PoolArgs,
    },
}

/// Worker pool settings shared by all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct PoolArgs {
    /// Configuration preset (default, high_performance, testing)
    #[arg(short = 'p', long, env = "ITEMS_CONFIG_PRESET")]
    pub preset: Option<String>,

    /// Number of always-running workers
    #[arg(long, env = "ITEMS_CORE_POOL_SIZE")]
    pub core_pool_size: Option<usize>,

    /// Upper bound of workers while the queue is full
    #[arg(long, env = "ITEMS_MAX_POOL_SIZE")]
    pub max_pool_size: Option<usize>,

    /// Capacity of the task queue
    #[arg(long, env = "ITEMS_QUEUE_CAPACITY")]
    pub queue_capacity: Option<usize>,

    /// Fixed latency per item in milliseconds
    #[arg(long, env = "ITEMS_PER_ITEM_DELAY_MS")]
    pub per_item_delay_ms: Option<u64>,
}

impl PoolArgs {
    /// プリセットに個別指定を上書きした設定を作成する
    pub fn to_config(&self) -> ProcessingResult<DefaultProcessingConfig> {
        let preset = match self.preset.as_deref() {
            Some(name) => name.parse::<ConfigPreset>()?,
            None => ConfigPreset::Default,
        };

        let mut config = DefaultProcessingConfig::from_preset(preset);
        if let Some(size) = self.core_pool_size {
            config = config.with_core_pool_size(size);
        }
        if let Some(size) = self.max_pool_size {
            config = config.with_max_pool_size(size);
        }
        if let Some(capacity) = self.queue_capacity {
            config = config.with_queue_capacity(capacity);
        }
        if let Some(delay_ms) = self.per_item_delay_ms {
            config = config.with_per_item_delay(Duration::from_millis(delay_ms));
        }

        config.validate()?;
        Ok(config)
    }
}

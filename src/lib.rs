pub mod cli;
pub mod core;
pub mod engine;
pub mod logging;
pub mod server;
pub mod services;
pub mod storage;

// 主要な型を再エクスポート
pub use crate::core::{
    BatchProcessor, FailureKind, Item, ItemFailure, ItemId, ProcessingConfig, ProcessingError,
    ProcessingReport, ProcessingResult, ProgressReporter, TaskOutcome,
};
pub use engine::{ItemBatchProcessor, JobHandle, WorkerPool};
pub use server::AppState;
pub use services::{
    ConfigPreset, DefaultProcessingConfig, ItemService, NoOpProgressReporter, ServerConfig,
    TracingProgressReporter,
};
pub use storage::{memory::InMemoryItemStore, ItemStore};

pub mod cluster;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod merge;
pub mod ocr;
pub mod pipeline;

pub use crate::config::AppConfig;
pub use crate::core::model::{Fragment, TextBlock};
pub use crate::error::OcrLinesError;
pub use crate::merge::{GreedyMergeEngine, MergeEngine, MergeKind, StagedRun};

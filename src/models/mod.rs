//! # 数据模型模块
//!
//! 定义文档与统计数据模型。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `report/` 使用
//! - 子模块: document, stats

pub mod document;
pub mod stats;

pub use document::Document;
pub use stats::{DirectoryStats, FailureStage, FileOutcome, GlobalSummary, ROOT_LABEL};

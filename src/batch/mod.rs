//! # 批量清洗模块
//!
//! 目录镜像遍历与逐文件清洗的核心流程。
//!
//! ## 功能
//! - 一级子目录枚举，根目录兜底
//! - 逐文件读取、空文件跳过、调用清洗服务、写出
//! - 文件级与目录级失败隔离
//! - 单目录统计与全局汇总
//!
//! ## 依赖关系
//! - 被 `commands/clean.rs` 使用
//! - 使用 `service/` 调用清洗服务
//! - 使用 `walkdir` 枚举目录

pub mod collector;
pub mod directory;
pub mod events;
pub mod storage;
pub mod transformer;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

pub use events::{PipelineEvent, ProgressSink, QuietSink};
pub use storage::FsStorage;
pub use transformer::Transformer;
pub use tree::{PipelineConfig, TreeOrchestrator};

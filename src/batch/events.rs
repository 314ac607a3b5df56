//! # 进度事件
//!
//! 核心流程通过 `ProgressSink` 发出结构化事件，不直接写终端。
//!
//! ## 依赖关系
//! - 被 `batch/directory.rs`, `batch/tree.rs` 发出
//! - 由 `utils/console.rs` 渲染到终端

use crate::models::{DirectoryStats, FailureStage};

use std::path::Path;
use std::time::Duration;

/// 流水线事件
#[derive(Debug, Clone, Copy)]
pub enum PipelineEvent<'a> {
    /// 开始处理根目录，`units` 为处理单元数
    RunStarted { source_root: &'a Path, units: usize },
    /// 根目录下没有子目录，根目录本身作为唯一单元
    NoSubdirectories { source_root: &'a Path },
    /// 开始处理一个单元
    UnitStarted { label: &'a str },
    /// 单元内发现的待处理文件数
    FilesFound { label: &'a str, count: usize },
    /// 单元内没有符合条件的文件
    NoEligibleFiles { label: &'a str },
    FileSucceeded {
        name: &'a str,
        elapsed: Duration,
        api_time: Duration,
    },
    FileSkipped { name: &'a str },
    FileFailed {
        name: &'a str,
        stage: FailureStage,
        reason: &'a str,
    },
    /// 单元级失败（无法列目录或创建输出目录），不影响后续单元
    DirectoryFailed { label: &'a str, reason: &'a str },
    DirectoryFinished { stats: &'a DirectoryStats },
}

/// 事件接收者
pub trait ProgressSink {
    fn emit(&self, event: PipelineEvent<'_>);
}

/// 静默模式过滤器：只转发失败事件，丢弃进度与成功事件
pub struct QuietSink<'a> {
    inner: &'a dyn ProgressSink,
}

impl<'a> QuietSink<'a> {
    pub fn new(inner: &'a dyn ProgressSink) -> Self {
        QuietSink { inner }
    }
}

impl ProgressSink for QuietSink<'_> {
    fn emit(&self, event: PipelineEvent<'_>) {
        if matches!(
            event,
            PipelineEvent::FileFailed { .. } | PipelineEvent::DirectoryFailed { .. }
        ) {
            self.inner.emit(event);
        }
    }
}

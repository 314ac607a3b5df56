//! # 统计数据模型
//!
//! 单目录统计 `DirectoryStats` 与全局汇总 `GlobalSummary`。
//!
//! 失败数从不直接存储：`total_eligible` 中既非成功也非跳过的文件即为失败。
//!
//! ## 依赖关系
//! - 被 `batch/` 模块生成
//! - 被 `report/` 模块消费

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// 根目录作为唯一单元时的显示名
pub const ROOT_LABEL: &str = "(root)";

/// 单个文件失败所处的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Read,
    Transform,
    Write,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Read => write!(f, "read"),
            FailureStage::Transform => write!(f, "transform"),
            FailureStage::Write => write!(f, "write"),
        }
    }
}

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// 清洗并写出成功
    Succeeded { api_time: Duration },
    /// 内容为空，未调用服务
    SkippedEmpty,
    /// 读取、清洗或写出失败
    Failed { stage: FailureStage, reason: String },
}

/// 单目录统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryStats {
    /// 目录名；空字符串表示根目录被当作唯一处理单元
    pub label: String,
    pub succeeded: usize,
    pub skipped_empty: usize,
    pub total_eligible: usize,
    /// 从第一个文件读取到最后一个文件完成的墙钟时间
    pub elapsed: Duration,
    /// 成功调用的服务耗时累计
    pub api_time: Duration,
}

impl DirectoryStats {
    /// 创建全零统计
    pub fn empty(label: impl Into<String>) -> Self {
        DirectoryStats {
            label: label.into(),
            ..Default::default()
        }
    }

    /// 合并单个文件的处理结果
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.total_eligible += 1;
        match outcome {
            FileOutcome::Succeeded { api_time } => {
                self.succeeded += 1;
                self.api_time += *api_time;
            }
            FileOutcome::SkippedEmpty => self.skipped_empty += 1,
            FileOutcome::Failed { .. } => {}
        }
    }

    /// 隐式失败数
    pub fn failed(&self) -> usize {
        self.total_eligible
            .saturating_sub(self.succeeded + self.skipped_empty)
    }

    /// 显示用名称
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            ROOT_LABEL
        } else {
            &self.label
        }
    }

    /// 成功率（百分比）；无文件时为 None
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_eligible == 0 {
            None
        } else {
            Some(self.succeeded as f64 / self.total_eligible as f64 * 100.0)
        }
    }
}

/// 全局汇总
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalSummary {
    /// 输出根目录
    pub output_root: PathBuf,
    pub total_directories: usize,
    pub total_files: usize,
    pub total_succeeded: usize,
    pub total_skipped: usize,
    /// 各目录耗时之和
    pub total_elapsed: Duration,
    pub total_api_time: Duration,
    /// 整次运行的墙钟时间（含目录枚举）
    pub wall_time: Duration,
    /// 按处理顺序排列的各目录统计
    pub directories: Vec<DirectoryStats>,
}

impl GlobalSummary {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        GlobalSummary {
            output_root: output_root.into(),
            ..Default::default()
        }
    }

    /// 按字段累加一个目录的统计，并追加到有序列表
    pub fn fold(&mut self, stats: DirectoryStats) {
        self.total_directories += 1;
        self.total_files += stats.total_eligible;
        self.total_succeeded += stats.succeeded;
        self.total_skipped += stats.skipped_empty;
        self.total_elapsed += stats.elapsed;
        self.total_api_time += stats.api_time;
        self.directories.push(stats);
    }

    /// 记录运行总耗时，结束汇总
    pub fn finalize(mut self, wall_time: Duration) -> Self {
        self.wall_time = wall_time;
        self
    }

    /// 全局隐式失败数
    pub fn total_failed(&self) -> usize {
        self.total_files
            .saturating_sub(self.total_succeeded + self.total_skipped)
    }
}

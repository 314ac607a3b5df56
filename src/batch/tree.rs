//! # 目录树调度器
//!
//! 遍历源根目录的一级子目录，逐个交给 `DirectoryProcessor`，并把各目录统计汇总为
//! `GlobalSummary`。
//!
//! ## 功能
//! - 源根目录不存在时立即失败（唯一的致命前置条件）
//! - 无子目录时把根目录本身作为唯一单元，输出直接写入输出根目录
//! - 目录级隔离：任何单元的失败都不会中止后续单元
//!
//! ## 依赖关系
//! - 被 `commands/clean.rs` 调用
//! - 使用 `batch/directory.rs`, `batch/storage.rs`, `models/stats.rs`

use super::collector::{FileCollector, DEFAULT_PATTERN};
use super::directory::{DirectoryProcessor, DEFAULT_OUTPUT_PREFIX};
use super::events::{PipelineEvent, ProgressSink};
use super::storage::Storage;
use super::transformer::Transformer;
use crate::error::{Result, ScrubError};
use crate::models::{GlobalSummary, ROOT_LABEL};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// 流水线配置
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 源根目录
    pub source_root: PathBuf,
    /// 输出根目录
    pub output_root: PathBuf,
    /// 待处理文件名模式
    pub pattern: String,
    /// 输出文件名前缀
    pub output_prefix: String,
}

impl PipelineConfig {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            source_root: source_root.into(),
            output_root: output_root.into(),
            pattern: DEFAULT_PATTERN.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

/// 一个处理单元：统计名、源目录、镜像输出目录
struct WorkUnit {
    label: String,
    source_dir: PathBuf,
    output_dir: PathBuf,
}

/// 目录树调度器
pub struct TreeOrchestrator<'a> {
    config: PipelineConfig,
    storage: &'a dyn Storage,
    sink: &'a dyn ProgressSink,
    processor: DirectoryProcessor<'a>,
}

impl<'a> TreeOrchestrator<'a> {
    pub fn new(
        config: PipelineConfig,
        storage: &'a dyn Storage,
        transformer: &'a Transformer,
        sink: &'a dyn ProgressSink,
    ) -> Self {
        let processor = DirectoryProcessor::new(storage, transformer, sink)
            .with_collector(FileCollector::new(&config.pattern))
            .with_output_prefix(config.output_prefix.clone());

        TreeOrchestrator {
            config,
            storage,
            sink,
            processor,
        }
    }

    /// 按配置的根目录运行
    pub fn run(&self) -> Result<GlobalSummary> {
        self.process_tree(&self.config.source_root, &self.config.output_root)
    }

    /// 处理整棵目录树
    pub fn process_tree(&self, source_root: &Path, output_root: &Path) -> Result<GlobalSummary> {
        if !self.storage.is_dir(source_root) {
            return Err(ScrubError::DirectoryNotFound {
                path: source_root.display().to_string(),
            });
        }

        let started = Instant::now();
        self.storage.ensure_dir(output_root)?;

        let units = self.plan_units(source_root, output_root)?;
        self.sink.emit(PipelineEvent::RunStarted {
            source_root,
            units: units.len(),
        });

        let mut summary = GlobalSummary::new(output_root);
        for unit in &units {
            let label = if unit.label.is_empty() {
                ROOT_LABEL
            } else {
                unit.label.as_str()
            };
            self.sink.emit(PipelineEvent::UnitStarted { label });

            let stats = if unit.label.is_empty() {
                self.processor
                    .process_unit("", &unit.source_dir, &unit.output_dir)
            } else {
                self.processor
                    .process_directory(&unit.source_dir, &unit.output_dir)
            };
            summary.fold(stats);
        }

        Ok(summary.finalize(started.elapsed()))
    }

    /// 一级子目录各为一个单元；没有子目录时根目录本身为唯一单元
    fn plan_units(&self, source_root: &Path, output_root: &Path) -> Result<Vec<WorkUnit>> {
        let units: Vec<WorkUnit> = self
            .storage
            .list_entries(source_root)?
            .into_iter()
            .filter(|entry| entry.is_dir)
            .map(|entry| WorkUnit {
                label: entry.display_name(),
                source_dir: source_root.join(&entry.name),
                output_dir: output_root.join(&entry.name),
            })
            .collect();

        if !units.is_empty() {
            return Ok(units);
        }

        self.sink
            .emit(PipelineEvent::NoSubdirectories { source_root });
        Ok(vec![WorkUnit {
            label: String::new(),
            source_dir: source_root.to_path_buf(),
            output_dir: output_root.to_path_buf(),
        }])
    }
}

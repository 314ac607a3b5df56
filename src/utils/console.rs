//! # 终端进度渲染
//!
//! 把 `PipelineEvent` 渲染为彩色终端提示，每个目录一个进度条。
//! 进度条存在期间的提示通过 `ProgressBar::suspend` 打印，避免与进度条交错。
//!
//! ## 依赖关系
//! - 实现 `batch::ProgressSink`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use super::{output, progress};
use crate::batch::{PipelineEvent, ProgressSink};

use indicatif::ProgressBar;
use std::cell::RefCell;

/// 终端事件接收者
#[derive(Default)]
pub struct ConsoleSink {
    bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 打印提示；有进度条时先挂起进度条
    fn notice(&self, print: impl FnOnce()) {
        match self.bar.borrow().as_ref() {
            Some(pb) => pb.suspend(print),
            None => print(),
        }
    }

    fn advance(&self) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.inc(1);
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressSink for ConsoleSink {
    fn emit(&self, event: PipelineEvent<'_>) {
        match event {
            PipelineEvent::RunStarted { source_root, units } => {
                output::print_info(&format!(
                    "Processing {} director{} under '{}'",
                    units,
                    if units == 1 { "y" } else { "ies" },
                    source_root.display()
                ));
                output::print_separator();
            }
            PipelineEvent::NoSubdirectories { source_root } => {
                output::print_warning(&format!(
                    "No subdirectories in '{}', treating it as a single directory",
                    source_root.display()
                ));
            }
            PipelineEvent::UnitStarted { label } => output::print_directory(label),
            PipelineEvent::FilesFound { label, count } => {
                output::print_info(&format!("Found {} file(s) in '{}'", count, label));
                *self.bar.borrow_mut() = Some(progress::create_progress_bar(count as u64, label));
            }
            PipelineEvent::NoEligibleFiles { label } => {
                output::print_skip(&format!("No eligible files in '{}'", label));
            }
            PipelineEvent::FileSucceeded {
                name,
                elapsed,
                api_time,
            } => {
                self.notice(|| {
                    output::print_success(&format!(
                        "{} ({:.2}s, API {:.2}s)",
                        name,
                        elapsed.as_secs_f64(),
                        api_time.as_secs_f64()
                    ))
                });
                self.advance();
            }
            PipelineEvent::FileSkipped { name } => {
                self.notice(|| output::print_skip(&format!("{}: empty file", name)));
                self.advance();
            }
            PipelineEvent::FileFailed {
                name,
                stage,
                reason,
            } => {
                self.notice(|| {
                    output::print_error(&format!("{}: {} failed: {}", name, stage, reason))
                });
                self.advance();
            }
            PipelineEvent::DirectoryFailed { label, reason } => {
                self.finish_bar();
                output::print_error(&format!("Directory '{}' failed: {}", label, reason));
            }
            PipelineEvent::DirectoryFinished { stats } => {
                self.finish_bar();
                output::print_done(&format!(
                    "'{}': cleaned {}/{}, skipped {}, {:.2}s",
                    stats.display_label(),
                    stats.succeeded,
                    stats.total_eligible,
                    stats.skipped_empty,
                    stats.elapsed.as_secs_f64()
                ));
            }
        }
    }
}

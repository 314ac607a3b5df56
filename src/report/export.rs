//! # CSV 导出
//!
//! 把各目录统计写为 CSV，每行一个目录，顺序与处理顺序一致。
//!
//! ## 依赖关系
//! - 被 `commands/clean.rs` 调用
//! - 使用 `csv`, `serde`

use crate::error::{Result, ScrubError};
use crate::models::{DirectoryStats, GlobalSummary};

use serde::Serialize;
use std::path::Path;

/// CSV 行
#[derive(Debug, Serialize)]
struct SummaryRecord<'a> {
    directory: &'a str,
    total_eligible: usize,
    succeeded: usize,
    skipped_empty: usize,
    failed: usize,
    elapsed_secs: f64,
    api_secs: f64,
}

impl<'a> From<&'a DirectoryStats> for SummaryRecord<'a> {
    fn from(stats: &'a DirectoryStats) -> Self {
        SummaryRecord {
            directory: stats.display_label(),
            total_eligible: stats.total_eligible,
            succeeded: stats.succeeded,
            skipped_empty: stats.skipped_empty,
            failed: stats.failed(),
            elapsed_secs: stats.elapsed.as_secs_f64(),
            api_secs: stats.api_time.as_secs_f64(),
        }
    }
}

/// 写出目录统计 CSV
pub fn write_csv(summary: &GlobalSummary, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for stats in &summary.directories {
        wtr.serialize(SummaryRecord::from(stats))?;
    }

    wtr.flush().map_err(|e| ScrubError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

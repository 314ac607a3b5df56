//! # 汇总报告
//!
//! 把 `GlobalSummary` 渲染为终端文本。纯函数，不修改汇总数据。
//!
//! 所有派生比率在分母为零时显示 `n/a`（目录成功率显示 `no files`）。
//!
//! ## 依赖关系
//! - 被 `commands/clean.rs` 调用
//! - 使用 `tabled` 生成目录表格
//! - 子模块: export (CSV 导出)

pub mod export;

use crate::models::{DirectoryStats, GlobalSummary};

use std::time::Duration;
use tabled::{Table, Tabled};

/// 不适用指示
const NOT_APPLICABLE: &str = "n/a";

/// 汇总行标签列宽
const LABEL_WIDTH: usize = 26;

/// 目录表格行
#[derive(Debug, Clone, Tabled)]
struct DirectoryRow {
    #[tabled(rename = "Directory")]
    directory: String,
    #[tabled(rename = "Cleaned")]
    cleaned: String,
    #[tabled(rename = "Skipped")]
    skipped: usize,
    #[tabled(rename = "Failed")]
    failed: usize,
    #[tabled(rename = "Success")]
    success: String,
    #[tabled(rename = "Time (s)")]
    time: String,
    #[tabled(rename = "API (s)")]
    api: String,
}

impl From<&DirectoryStats> for DirectoryRow {
    fn from(stats: &DirectoryStats) -> Self {
        DirectoryRow {
            directory: stats.display_label().to_string(),
            cleaned: format!("{}/{}", stats.succeeded, stats.total_eligible),
            skipped: stats.skipped_empty,
            failed: stats.failed(),
            success: stats
                .success_rate()
                .map(|rate| format!("{:.1}%", rate))
                .unwrap_or_else(|| "no files".to_string()),
            time: format!("{:.2}", stats.elapsed.as_secs_f64()),
            api: format!("{:.2}", stats.api_time.as_secs_f64()),
        }
    }
}

/// 平均每个成功文件的耗时（秒）
pub fn average_per_success(total: Duration, succeeded: usize) -> Option<f64> {
    if succeeded == 0 {
        None
    } else {
        Some(total.as_secs_f64() / succeeded as f64)
    }
}

/// 服务调用耗时占比（百分比），两者都为正时才有定义
pub fn api_share(api_time: Duration, elapsed: Duration) -> Option<f64> {
    if api_time.is_zero() || elapsed.is_zero() {
        None
    } else {
        Some(api_time.as_secs_f64() / elapsed.as_secs_f64() * 100.0)
    }
}

/// 秒数；超过一分钟时附加分秒表示
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs > 60.0 {
        let minutes = (secs / 60.0).floor();
        format!("{:.2} s ({}m {:.2}s)", secs, minutes as u64, secs - minutes * 60.0)
    } else {
        format!("{:.2} s", secs)
    }
}

fn or_na(value: Option<f64>, render: impl Fn(f64) -> String) -> String {
    value.map(render).unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

/// 渲染完整报告
pub fn render(summary: &GlobalSummary) -> String {
    let mut out = String::new();

    out.push_str("Per-directory results\n");
    if summary.directories.is_empty() {
        out.push_str("  (no directories processed)\n");
    } else {
        let rows: Vec<DirectoryRow> = summary.directories.iter().map(DirectoryRow::from).collect();
        out.push_str(&Table::new(&rows).to_string());
        out.push('\n');
    }

    let lines = [
        ("Directories", summary.total_directories.to_string()),
        ("Files", summary.total_files.to_string()),
        ("Cleaned", summary.total_succeeded.to_string()),
        ("Skipped (empty)", summary.total_skipped.to_string()),
        ("Failed", summary.total_failed().to_string()),
        // 各目录处理耗时之和，平均值与 API 占比都以它为分母
        ("Processing time", format_duration(summary.total_elapsed)),
        (
            "Avg processing per file",
            or_na(
                average_per_success(summary.total_elapsed, summary.total_succeeded),
                |v| format!("{:.2} s", v),
            ),
        ),
        (
            "Avg API per call",
            or_na(
                average_per_success(summary.total_api_time, summary.total_succeeded),
                |v| format!("{:.2} s", v),
            ),
        ),
        (
            "API share of processing",
            or_na(
                api_share(summary.total_api_time, summary.total_elapsed),
                |v| format!("{:.1}%", v),
            ),
        ),
        ("Total time (wall)", format_duration(summary.wall_time)),
    ];

    out.push_str("\nSummary\n");
    for (name, value) in lines {
        out.push_str(&format!(
            "  {:<width$}{}\n",
            format!("{}:", name),
            value,
            width = LABEL_WIDTH
        ));
    }
    out.push_str(&format!(
        "\nResults saved under '{}'\n",
        summary.output_root.display()
    ));

    out
}

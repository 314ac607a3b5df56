//! # clean 子命令 CLI 定义
//!
//! 批量清洗两级目录树中的文本文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/clean.rs`

use crate::batch::collector::DEFAULT_PATTERN;
use crate::batch::directory::DEFAULT_OUTPUT_PREFIX;
use crate::batch::PipelineConfig;
use crate::error::{Result, ScrubError};
use crate::service::chat::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::service::prompt::DEFAULT_TEMPERATURE;
use crate::service::ServiceConfig;

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// clean 子命令参数
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Root directory containing the source subdirectories
    #[arg(long, default_value = "./part2")]
    pub source: PathBuf,

    /// Root directory for the cleaned, mirrored output tree
    #[arg(long, default_value = "./cleaned_txt_part2")]
    pub output: PathBuf,

    /// File name pattern(s) to clean, comma-separated (supports * and ?)
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Prefix prepended to every output file name
    #[arg(long, default_value = DEFAULT_OUTPUT_PREFIX)]
    pub prefix: String,

    /// Also write per-directory statistics to this CSV file
    #[arg(long)]
    pub summary_csv: Option<PathBuf>,

    /// Suppress progress and success output; failures are still printed
    #[arg(long, short, default_value_t = false)]
    pub quiet: bool,

    // ─────────────────────────────────────────────────────────────
    // Service options
    // ─────────────────────────────────────────────────────────────
    /// API key for the cleaning service
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible cleaning service
    #[arg(long, env = "DEEPSEEK_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Model used for cleaning
    #[arg(long, env = "DEEPSEEK_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature (0.0 - 2.0); low values keep cleaning literal
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 300)]
    pub timeout: u64,
}

impl CleanArgs {
    /// 流水线配置
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            pattern: self.pattern.clone(),
            output_prefix: self.prefix.clone(),
            ..PipelineConfig::new(&self.source, &self.output)
        }
    }

    /// 服务配置；缺少 API key 或参数越界时报错
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ScrubError::MissingApiKey)?;

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ScrubError::InvalidArgument(format!(
                "temperature must be within 0.0-2.0, got {}",
                self.temperature
            )));
        }

        if self.timeout == 0 {
            return Err(ScrubError::InvalidArgument(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(ServiceConfig {
            api_base: self.api_base.clone(),
            api_key: api_key.to_string(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

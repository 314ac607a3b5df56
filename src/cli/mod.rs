//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `clean`: 批量清洗文本目录树
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: clean

pub mod clean;

use clap::{Parser, Subcommand};

/// intel-scrub - 威胁情报文本批量清洗工具
#[derive(Parser)]
#[command(name = "intel-scrub")]
#[command(version)]
#[command(about = "Batch-clean threat-intelligence text corpora through an LLM service", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Clean every .txt file of a two-level directory tree into a mirrored output tree
    Clean(clean::CleanArgs),
}

//! # intel-scrub - 威胁情报文本批量清洗工具
//!
//! 遍历两级目录树中的原始文本，逐个提交给外部清洗服务（去除页眉页脚、
//! 版权声明、参考文献等非正文内容），把清洗结果写入镜像输出目录，并汇总统计。
//!
//! ## 子命令
//! - `clean` - 批量清洗并打印报告
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/    (目录遍历与逐文件清洗)
//!   │     ├── service/  (清洗服务客户端)
//!   │     ├── report/   (汇总报告)
//!   │     └── models/   (数据模型)
//!   ├── utils/      (终端输出)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod report;
mod service;
mod utils;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // .env 中的凭据（可选）
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&error::describe(&e));
        std::process::exit(1);
    }
}

/// 诊断日志输出到 stderr，由 RUST_LOG 控制，默认 warn
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

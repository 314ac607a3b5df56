//! # clean 命令实现
//!
//! 批量清洗目录树并打印汇总报告。
//!
//! ## 功能
//! - 组装清洗服务客户端与流水线
//! - 逐目录、逐文件清洗，实时输出进度
//! - 打印汇总报告，可选导出 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/clean.rs` 定义的参数
//! - 使用 `batch/`, `service/`, `report/`
//! - 使用 `utils/output.rs`, `utils/console.rs`

use crate::batch::{FsStorage, ProgressSink, QuietSink, Transformer, TreeOrchestrator};
use crate::cli::clean::CleanArgs;
use crate::error::Result;
use crate::report;
use crate::service::ChatClient;
use crate::utils::console::ConsoleSink;
use crate::utils::output;

/// 执行 clean 命令
pub fn execute(args: CleanArgs) -> Result<()> {
    output::print_header("Cleaning Text Corpus");

    let pipeline = args.pipeline_config();
    let service = args.service_config()?;

    let client = ChatClient::new(service)?;
    let model = client.model().to_string();
    let transformer = Transformer::new(Box::new(client)).with_temperature(args.temperature);
    output::print_info(&format!(
        "Model: {} (temperature {})",
        model,
        transformer.temperature()
    ));

    let console = ConsoleSink::new();
    let quiet = QuietSink::new(&console);
    let sink: &dyn ProgressSink = if args.quiet { &quiet } else { &console };

    let orchestrator = TreeOrchestrator::new(pipeline, &FsStorage, &transformer, sink);
    let summary = orchestrator.run()?;

    output::print_header("Cleaning Report");
    print!("{}", report::render(&summary));

    if let Some(ref csv_path) = args.summary_csv {
        report::export::write_csv(&summary, csv_path)?;
        output::print_success(&format!(
            "Directory statistics saved to '{}'",
            csv_path.display()
        ));
    }

    Ok(())
}

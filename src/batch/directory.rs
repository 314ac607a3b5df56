//! # 单目录处理器
//!
//! 清洗一个源目录下的全部待处理文件，写入镜像输出目录，并返回该目录的统计。
//!
//! ## 功能
//! - 非递归枚举，按枚举顺序逐个处理
//! - 逐文件隔离：单个文件的读取、清洗、写出失败不影响其余文件
//! - 空文件跳过，不调用清洗服务
//! - 没有待处理文件时不创建输出目录
//!
//! ## 依赖关系
//! - 被 `batch/tree.rs` 调用
//! - 使用 `batch/storage.rs`, `batch/collector.rs`, `batch/transformer.rs`
//! - 通过 `batch/events.rs` 报告进度

use super::collector::FileCollector;
use super::events::{PipelineEvent, ProgressSink};
use super::storage::Storage;
use super::transformer::{TransformResult, Transformer};
use crate::error;
use crate::models::{DirectoryStats, Document, FailureStage, FileOutcome};

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::time::Instant;

/// 默认输出文件名前缀
pub const DEFAULT_OUTPUT_PREFIX: &str = "cleaned_";

/// 单目录处理器
pub struct DirectoryProcessor<'a> {
    storage: &'a dyn Storage,
    transformer: &'a Transformer,
    sink: &'a dyn ProgressSink,
    collector: FileCollector,
    output_prefix: String,
}

impl<'a> DirectoryProcessor<'a> {
    pub fn new(
        storage: &'a dyn Storage,
        transformer: &'a Transformer,
        sink: &'a dyn ProgressSink,
    ) -> Self {
        DirectoryProcessor {
            storage,
            transformer,
            sink,
            collector: FileCollector::default(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }

    /// 设置文件筛选器
    pub fn with_collector(mut self, collector: FileCollector) -> Self {
        self.collector = collector;
        self
    }

    /// 设置输出文件名前缀
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// 处理目录，统计名取 `source_dir` 的最后一级路径
    pub fn process_directory(&self, source_dir: &Path, output_dir: &Path) -> DirectoryStats {
        let label = source_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.process_unit(&label, source_dir, output_dir)
    }

    /// 以指定统计名处理目录（空名表示根目录单元）
    pub fn process_unit(&self, label: &str, source_dir: &Path, output_dir: &Path) -> DirectoryStats {
        let mut stats = DirectoryStats::empty(label);
        let display = stats.display_label().to_string();

        let entries = match self.storage.list_entries(source_dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.sink.emit(PipelineEvent::DirectoryFailed {
                    label: &display,
                    reason: &error::describe(&e),
                });
                return stats;
            }
        };

        let files = self.collector.eligible(&entries);
        if files.is_empty() {
            self.sink
                .emit(PipelineEvent::NoEligibleFiles { label: &display });
            return stats;
        }

        self.sink.emit(PipelineEvent::FilesFound {
            label: &display,
            count: files.len(),
        });

        // 输出目录不可用时，所有文件计为隐式失败
        if let Err(e) = self.storage.ensure_dir(output_dir) {
            self.sink.emit(PipelineEvent::DirectoryFailed {
                label: &display,
                reason: &error::describe(&e),
            });
            stats.total_eligible = files.len();
            return stats;
        }

        let started = Instant::now();
        for file_name in &files {
            let file_started = Instant::now();
            let name = file_name.to_string_lossy();
            let outcome = self.process_file(source_dir, output_dir, file_name);

            match &outcome {
                FileOutcome::Succeeded { api_time } => {
                    self.sink.emit(PipelineEvent::FileSucceeded {
                        name: &name,
                        elapsed: file_started.elapsed(),
                        api_time: *api_time,
                    })
                }
                FileOutcome::SkippedEmpty => {
                    self.sink.emit(PipelineEvent::FileSkipped { name: &name })
                }
                FileOutcome::Failed { stage, reason } => {
                    self.sink.emit(PipelineEvent::FileFailed {
                        name: &name,
                        stage: *stage,
                        reason,
                    })
                }
            }

            stats.record(&outcome);
        }
        stats.elapsed = started.elapsed();

        self.sink
            .emit(PipelineEvent::DirectoryFinished { stats: &stats });
        stats
    }

    /// 输出文件名：固定前缀 + 源文件名（原始字节不变）
    pub fn output_name(&self, source_name: &OsStr) -> OsString {
        let mut name = OsString::from(&self.output_prefix);
        name.push(source_name);
        name
    }

    /// 处理单个文件，所有错误都转为 `FileOutcome::Failed`
    fn process_file(&self, source_dir: &Path, output_dir: &Path, name: &OsStr) -> FileOutcome {
        let document = match self.storage.read_text(&source_dir.join(name)) {
            Ok(content) => Document::new(name.to_string_lossy(), content),
            Err(e) => {
                return FileOutcome::Failed {
                    stage: FailureStage::Read,
                    reason: error::describe(&e),
                }
            }
        };

        if document.is_blank() {
            return FileOutcome::SkippedEmpty;
        }

        tracing::debug!(file = %document.name, bytes = document.size(), "Cleaning document");

        match self.transformer.transform(&document.content) {
            TransformResult::Success { content, elapsed } => {
                let output_path = output_dir.join(self.output_name(name));
                match self.storage.write_text(&output_path, &content) {
                    Ok(()) => FileOutcome::Succeeded { api_time: elapsed },
                    Err(e) => FileOutcome::Failed {
                        stage: FailureStage::Write,
                        reason: error::describe(&e),
                    },
                }
            }
            TransformResult::Failure { reason } => FileOutcome::Failed {
                stage: FailureStage::Transform,
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::storage::FsStorage;
    use crate::batch::testing::{write_file, FailingWrites, RecordingSink, StubService};
    use std::fs;
    use tempfile::TempDir;

    fn count_files(dir: &Path) -> usize {
        fs::read_dir(dir).map(|rd| rd.count()).unwrap_or(0)
    }

    #[test]
    fn test_mixed_directory_accounting() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("alpha");
        let out = tmp.path().join("out").join("alpha");
        write_file(&src, "a.txt", "Indicator: 10.0.0.1\nPage 1 of 3");
        write_file(&src, "b.txt", "   \n\t");
        write_file(&src, "c.txt", "");
        write_file(&src, "readme.md", "not eligible");
        fs::create_dir_all(src.join("nested")).unwrap();
        write_file(&src.join("nested"), "deep.txt", "not descended into");

        let (service, calls) = StubService::echo();
        let transformer = Transformer::new(Box::new(service));
        let sink = RecordingSink::default();
        let processor = DirectoryProcessor::new(&FsStorage, &transformer, &sink);

        let stats = processor.process_directory(&src, &out);

        assert_eq!(stats.label, "alpha");
        assert_eq!(stats.total_eligible, 3);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.skipped_empty, 2);
        assert_eq!(stats.failed(), 0);
        assert_eq!(calls.borrow().len(), 1);

        let written = fs::read_to_string(out.join("cleaned_a.txt")).unwrap();
        assert_eq!(written, "CLEAN[Indicator: 10.0.0.1\nPage 1 of 3]");
        assert_eq!(count_files(&out), 1);
    }

    #[test]
    fn test_empty_files_never_reach_service() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("blank");
        write_file(&src, "zero.txt", "");
        write_file(&src, "spaces.txt", " \r\n \n");

        let (service, calls) = StubService::echo();
        let transformer = Transformer::new(Box::new(service));
        let sink = RecordingSink::default();
        let processor = DirectoryProcessor::new(&FsStorage, &transformer, &sink);

        let stats = processor.process_directory(&src, &tmp.path().join("out"));

        assert_eq!(stats.skipped_empty, 2);
        assert_eq!(stats.total_eligible, 2);
        assert!(calls.borrow().is_empty());
        assert_eq!(sink.count("file_skipped"), 2);
    }

    #[test]
    fn test_no_eligible_files_does_not_create_output() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("docs");
        write_file(&src, "report.pdf", "binary-ish");
        let out = tmp.path().join("out").join("docs");

        let (service, _) = StubService::echo();
        let transformer = Transformer::new(Box::new(service));
        let sink = RecordingSink::default();
        let processor = DirectoryProcessor::new(&FsStorage, &transformer, &sink);

        let stats = processor.process_directory(&src, &out);

        assert_eq!(stats, DirectoryStats::empty("docs"));
        assert!(!out.exists());
        assert_eq!(sink.events(), vec!["no_eligible_files:docs"]);
    }

    #[test]
    fn test_always_failing_service_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("gamma");
        let out = tmp.path().join("out").join("gamma");
        for name in ["1.txt", "2.txt", "3.txt"] {
            write_file(&src, name, "threat actor details");
        }

        let (service, calls) = StubService::failing();
        let transformer = Transformer::new(Box::new(service));
        let sink = RecordingSink::default();
        let processor = DirectoryProcessor::new(&FsStorage, &transformer, &sink);

        let stats = processor.process_directory(&src, &out);

        assert_eq!(stats.succeeded, 0);
        assert_eq!(stats.skipped_empty, 0);
        assert_eq!(stats.total_eligible, 3);
        assert_eq!(stats.failed(), 3);
        assert_eq!(stats.api_time, std::time::Duration::ZERO);
        assert_eq!(calls.borrow().len(), 3);
        assert_eq!(count_files(&out), 0);
        assert_eq!(sink.count("file_failed"), 3);
    }

    #[test]
    fn test_failure_is_isolated_to_one_file() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("delta");
        for (name, body) in [
            ("1.txt", "first"),
            ("2.txt", "second"),
            ("3.txt", "third"),
            ("4.txt", "fourth"),
        ] {
            write_file(&src, name, body);
        }

        let baseline_out = tmp.path().join("baseline");
        let (service, _) = StubService::echo();
        let transformer = Transformer::new(Box::new(service));
        let sink = RecordingSink::default();
        DirectoryProcessor::new(&FsStorage, &transformer, &sink)
            .process_directory(&src, &baseline_out);

        let injected_out = tmp.path().join("injected");
        let (service, calls) = StubService::failing_on("second");
        let transformer = Transformer::new(Box::new(service));
        let sink = RecordingSink::default();
        let stats = DirectoryProcessor::new(&FsStorage, &transformer, &sink)
            .process_directory(&src, &injected_out);

        assert_eq!(stats.succeeded, 3);
        assert_eq!(stats.failed(), 1);
        assert_eq!(calls.borrow().len(), 4);
        assert!(!injected_out.join("cleaned_2.txt").exists());
        for name in ["cleaned_1.txt", "cleaned_3.txt", "cleaned_4.txt"] {
            assert_eq!(
                fs::read_to_string(injected_out.join(name)).unwrap(),
                fs::read_to_string(baseline_out.join(name)).unwrap()
            );
        }
        assert_eq!(
            sink.events(),
            vec![
                "files_found:delta",
                "file_succeeded:1.txt",
                "file_failed:2.txt",
                "file_succeeded:3.txt",
                "file_succeeded:4.txt",
                "directory_finished:delta",
            ]
        );
    }

    #[test]
    fn test_read_failure_counts_as_implicit_failure() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("epsilon");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("broken.txt"), [0xc3, 0x28, 0xff]).unwrap();
        write_file(&src, "ok.txt", "payload");

        let (service, calls) = StubService::echo();
        let transformer = Transformer::new(Box::new(service));
        let sink = RecordingSink::default();
        let stats = DirectoryProcessor::new(&FsStorage, &transformer, &sink)
            .process_directory(&src, &tmp.path().join("out"));

        assert_eq!(stats.total_eligible, 2);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.skipped_empty, 0);
        assert_eq!(stats.failed(), 1);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_write_failure_downgrades_success() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("zeta");
        write_file(&src, "keep.txt", "keep me");
        write_file(&src, "lose.txt", "lose me");
        let out = tmp.path().join("out");

        let storage = FailingWrites::new("cleaned_lose.txt");
        let (service, calls) = StubService::echo();
        let transformer = Transformer::new(Box::new(service));
        let sink = RecordingSink::default();
        let stats =
            DirectoryProcessor::new(&storage, &transformer, &sink).process_directory(&src, &out);

        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed(), 1);
        assert_eq!(calls.borrow().len(), 2);
        assert!(out.join("cleaned_keep.txt").exists());
        assert!(!out.join("cleaned_lose.txt").exists());
    }

    #[test]
    fn test_custom_prefix_and_pattern() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("eta");
        write_file(&src, "a.md", "markdown body");
        write_file(&src, "b.txt", "text body");
        let out = tmp.path().join("out");

        let (service, _) = StubService::echo();
        let transformer = Transformer::new(Box::new(service));
        let sink = RecordingSink::default();
        let processor = DirectoryProcessor::new(&FsStorage, &transformer, &sink)
            .with_collector(FileCollector::new("*.md"))
            .with_output_prefix("scrubbed-");

        let stats = processor.process_directory(&src, &out);

        assert_eq!(stats.total_eligible, 1);
        assert!(out.join("scrubbed-a.md").exists());
        assert_eq!(processor.output_name(OsStr::new("x.txt")), "scrubbed-x.txt");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_file_name_is_cleaned_under_real_name() {
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("iota");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join(OsStr::from_bytes(b"apt-\xfe.txt")), "indicator").unwrap();
        let out = tmp.path().join("out");

        let (service, calls) = StubService::echo();
        let transformer = Transformer::new(Box::new(service));
        let sink = RecordingSink::default();
        let stats = DirectoryProcessor::new(&FsStorage, &transformer, &sink)
            .process_directory(&src, &out);

        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed(), 0);
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(
            fs::read_to_string(out.join(OsStr::from_bytes(b"cleaned_apt-\xfe.txt"))).unwrap(),
            "CLEAN[indicator]"
        );
        assert_eq!(sink.count("file_succeeded"), 1);
        assert!(sink
            .events()
            .contains(&"file_succeeded:apt-\u{FFFD}.txt".to_string()));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("theta");
        write_file(&src, "a.txt", "alpha");
        write_file(&src, "b.txt", "");
        write_file(&src, "c.txt", "gamma");
        let out = tmp.path().join("out");

        let run = || {
            let (service, _) = StubService::echo();
            let transformer = Transformer::new(Box::new(service));
            let sink = RecordingSink::default();
            let stats = DirectoryProcessor::new(&FsStorage, &transformer, &sink)
                .process_directory(&src, &out);
            (stats.succeeded, stats.skipped_empty, stats.total_eligible)
        };

        assert_eq!(run(), (2, 1, 3));
        assert_eq!(run(), (2, 1, 3));
    }
}

//! 测试替身：桩服务、事件记录器、可注入写失败的存储。

use super::events::{PipelineEvent, ProgressSink};
use super::storage::{Entry, FsStorage, Storage};
use crate::error::{Result, ScrubError, ServiceError};
use crate::service::TextService;

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// 一次桩服务调用的参数
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub instruction: String,
    pub payload: String,
    pub temperature: f64,
}

pub type CallLog = Rc<RefCell<Vec<RecordedCall>>>;

enum Behavior {
    Echo,
    Fail,
    FailOn(String),
}

/// 确定性的桩服务：回显为 `CLEAN[...]`，或按配置失败
pub struct StubService {
    behavior: Behavior,
    calls: CallLog,
}

impl StubService {
    fn with_behavior(behavior: Behavior) -> (Self, CallLog) {
        let calls = CallLog::default();
        (
            StubService {
                behavior,
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }

    pub fn echo() -> (Self, CallLog) {
        Self::with_behavior(Behavior::Echo)
    }

    pub fn failing() -> (Self, CallLog) {
        Self::with_behavior(Behavior::Fail)
    }

    /// 仅在输入与 `payload` 完全相同时失败
    pub fn failing_on(payload: &str) -> (Self, CallLog) {
        Self::with_behavior(Behavior::FailOn(payload.to_string()))
    }
}

impl TextService for StubService {
    fn complete(
        &self,
        instruction: &str,
        payload: &str,
        temperature: f64,
    ) -> std::result::Result<String, ServiceError> {
        self.calls.borrow_mut().push(RecordedCall {
            instruction: instruction.to_string(),
            payload: payload.to_string(),
            temperature,
        });

        let unavailable = || ServiceError::ApiError {
            code: 503,
            message: "service unavailable".to_string(),
        };

        match &self.behavior {
            Behavior::Echo => Ok(format!("CLEAN[{}]", payload)),
            Behavior::Fail => Err(unavailable()),
            Behavior::FailOn(target) if target == payload => Err(unavailable()),
            Behavior::FailOn(_) => Ok(format!("CLEAN[{}]", payload)),
        }
    }
}

/// 以 `kind:subject` 形式记录事件
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn count(&self, kind: &str) -> usize {
        let prefix = format!("{}:", kind);
        self.events
            .borrow()
            .iter()
            .filter(|e| e.starts_with(&prefix))
            .count()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: PipelineEvent<'_>) {
        let line = match event {
            PipelineEvent::RunStarted { units, .. } => format!("run_started:{}", units),
            PipelineEvent::NoSubdirectories { .. } => "no_subdirectories:".to_string(),
            PipelineEvent::UnitStarted { label } => format!("unit_started:{}", label),
            PipelineEvent::FilesFound { label, .. } => format!("files_found:{}", label),
            PipelineEvent::NoEligibleFiles { label } => format!("no_eligible_files:{}", label),
            PipelineEvent::FileSucceeded { name, .. } => format!("file_succeeded:{}", name),
            PipelineEvent::FileSkipped { name } => format!("file_skipped:{}", name),
            PipelineEvent::FileFailed { name, .. } => format!("file_failed:{}", name),
            PipelineEvent::DirectoryFailed { label, .. } => format!("directory_failed:{}", label),
            PipelineEvent::DirectoryFinished { stats } => {
                format!("directory_finished:{}", stats.display_label())
            }
        };
        self.events.borrow_mut().push(line);
    }
}

/// 对指定文件名的写入返回错误，其余操作委托给 `FsStorage`
pub struct FailingWrites {
    file_name: String,
}

impl FailingWrites {
    pub fn new(file_name: &str) -> Self {
        FailingWrites {
            file_name: file_name.to_string(),
        }
    }
}

impl Storage for FailingWrites {
    fn list_entries(&self, path: &Path) -> Result<Vec<Entry>> {
        FsStorage.list_entries(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        FsStorage.read_text(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        let name = path.file_name().map(|n| n.to_string_lossy().to_string());
        if name.as_deref() == Some(self.file_name.as_str()) {
            return Err(ScrubError::FileWriteError {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        FsStorage.write_text(path, content)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        FsStorage.ensure_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        FsStorage.is_dir(path)
    }
}

/// 写入测试文件（自动创建父目录）
pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

//! # 存储抽象
//!
//! 流水线只需要四种文件系统能力：列目录、读文本、写文本、确保目录存在。
//!
//! ## 依赖关系
//! - 被 `batch/directory.rs`, `batch/tree.rs` 调用
//! - `FsStorage` 使用 `walkdir` 列出单层目录

use crate::error::{Result, ScrubError};

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// 目录条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 条目名（不含父路径），保留文件系统原始字节
    pub name: OsString,
    pub is_dir: bool,
    /// 常规文件（符号链接按目标判断）
    pub is_file: bool,
}

impl Entry {
    /// 用于展示和统计的名字（非 UTF-8 字节替换为 U+FFFD）
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}

/// 存储能力
pub trait Storage {
    /// 列出目录的直接子条目（不递归），同一次运行中顺序确定
    fn list_entries(&self, path: &Path) -> Result<Vec<Entry>>;

    /// 读取 UTF-8 文本
    fn read_text(&self, path: &Path) -> Result<String>;

    /// 写入文本，覆盖已有文件
    fn write_text(&self, path: &Path, content: &str) -> Result<()>;

    /// 确保目录存在（幂等）
    fn ensure_dir(&self, path: &Path) -> Result<()>;

    /// 路径是否为已存在的目录
    fn is_dir(&self, path: &Path) -> bool;
}

/// 本地文件系统存储
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn list_entries(&self, path: &Path) -> Result<Vec<Entry>> {
        if !path.is_dir() {
            return Err(ScrubError::DirectoryNotFound {
                path: path.display().to_string(),
            });
        }

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for item in walker {
            let entry = match item {
                Ok(entry) => entry,
                // 目录本身不可读时整体失败；单个条目（如失效链接）直接忽略
                Err(e) if e.depth() == 0 => {
                    return Err(ScrubError::DirectoryReadError {
                        path: path.display().to_string(),
                        source: e,
                    })
                }
                Err(_) => continue,
            };

            let file_type = entry.file_type();
            entries.push(Entry {
                name: entry.file_name().to_os_string(),
                is_dir: file_type.is_dir(),
                is_file: file_type.is_file(),
            });
        }

        Ok(entries)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| ScrubError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| ScrubError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| ScrubError::DirectoryCreateError {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

//! # 文件收集器
//!
//! 从目录条目中筛选待清洗文件。
//!
//! ## 功能
//! - glob 模式匹配（逗号分隔的多模式，支持 `*` 和 `?`）
//! - 仅选取常规文件，忽略子目录
//! - 保持存储层给出的枚举顺序
//!
//! ## 依赖关系
//! - 被 `batch/directory.rs` 调用
//! - 使用 `batch/storage.rs` 的 `Entry`

use super::storage::Entry;

use std::ffi::OsString;

/// 默认匹配模式
pub const DEFAULT_PATTERN: &str = "*.txt";

/// 文件收集器
#[derive(Debug, Clone)]
pub struct FileCollector {
    /// 匹配模式列表
    patterns: Vec<String>,
}

impl Default for FileCollector {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl FileCollector {
    /// 创建文件收集器（逗号分隔的多模式）
    pub fn new(pattern: &str) -> Self {
        let mut patterns: Vec<String> = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if patterns.is_empty() {
            patterns = vec![DEFAULT_PATTERN.to_string()];
        }
        Self { patterns }
    }

    /// 筛选出符合条件的文件名，顺序与输入一致；按展示名匹配，返回原始名
    pub fn eligible(&self, entries: &[Entry]) -> Vec<OsString> {
        entries
            .iter()
            .filter(|e| e.is_file && self.matches(&e.display_name()))
            .map(|e| e.name.clone())
            .collect()
    }

    /// 检查文件名是否匹配任一模式
    pub fn matches(&self, filename: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| Self::glob_match(pattern, filename))
    }

    /// 简单 glob 匹配（支持 * 和 ? 通配符）
    fn glob_match(pattern: &str, text: &str) -> bool {
        let pattern: Vec<char> = pattern.chars().collect();
        let text: Vec<char> = text.chars().collect();

        let mut p = 0;
        let mut t = 0;
        let mut star_p = None;
        let mut star_t = 0;

        while t < text.len() {
            if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
                p += 1;
                t += 1;
            } else if p < pattern.len() && pattern[p] == '*' {
                star_p = Some(p);
                star_t = t;
                p += 1;
            } else if let Some(sp) = star_p {
                p = sp + 1;
                star_t += 1;
                t = star_t;
            } else {
                return false;
            }
        }

        while p < pattern.len() && pattern[p] == '*' {
            p += 1;
        }

        p == pattern.len()
    }
}

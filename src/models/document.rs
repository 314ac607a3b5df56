//! # 文档数据模型
//!
//! 从源文件读入内存的单个文本文档。
//!
//! ## 依赖关系
//! - 被 `batch/directory.rs` 使用

/// 待清洗的文本文档
///
/// 由当前处理步骤独占，写出或丢弃后即销毁。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// 源文件名（相对于所在目录）
    pub name: String,
    /// 原始内容
    pub content: String,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            content: content.into(),
        }
    }

    /// 内容字节数
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// 内容为空或仅含空白字符
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

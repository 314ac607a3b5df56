//! # 工具函数模块
//!
//! 提供美化输出、进度条与终端事件渲染。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: console, output, progress

pub mod console;
pub mod output;
pub mod progress;

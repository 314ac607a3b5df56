//! # 清洗服务模块
//!
//! 对外部文本清洗服务的抽象：输入固定指令与待清洗文本，返回清洗后的文本或错误。
//!
//! ## 依赖关系
//! - 被 `batch/transformer.rs` 使用
//! - 子模块: chat (OpenAI 兼容接口实现), prompt (固定清洗指令)

pub mod chat;
pub mod prompt;

pub use chat::{ChatClient, ServiceConfig};

use crate::error::ServiceError;

/// 文本清洗服务
///
/// 一次调用即一次同步请求；实现方不得在调用之间保留状态。
pub trait TextService {
    /// 以 `instruction` 为系统指令清洗 `payload`
    fn complete(
        &self,
        instruction: &str,
        payload: &str,
        temperature: f64,
    ) -> Result<String, ServiceError>;
}

//! # 清洗调用器
//!
//! 包装一次清洗服务调用：输入原始文本，输出带耗时的清洗结果或失败原因。
//! 任何服务错误都在这里转为 `TransformResult::Failure`，不会继续向上传播。
//!
//! ## 依赖关系
//! - 被 `batch/directory.rs` 调用
//! - 使用 `service::TextService`, `service::prompt`

use crate::error;
use crate::service::prompt::{CLEANING_PROMPT, DEFAULT_TEMPERATURE};
use crate::service::TextService;

use std::time::{Duration, Instant};

/// 单次清洗结果
#[derive(Debug, Clone, PartialEq)]
pub enum TransformResult {
    Success { content: String, elapsed: Duration },
    Failure { reason: String },
}

/// 清洗调用器
pub struct Transformer {
    service: Box<dyn TextService>,
    instruction: String,
    temperature: f64,
}

impl Transformer {
    /// 使用固定清洗指令与默认温度创建
    pub fn new(service: Box<dyn TextService>) -> Self {
        Transformer {
            service,
            instruction: CLEANING_PROMPT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// 设置采样温度
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// 清洗一段非空文本（调用方保证非空）
    pub fn transform(&self, raw_text: &str) -> TransformResult {
        let started = Instant::now();
        match self
            .service
            .complete(&self.instruction, raw_text, self.temperature)
        {
            Ok(content) => TransformResult::Success {
                content,
                elapsed: started.elapsed(),
            },
            Err(e) => {
                tracing::debug!(error = %e, "Cleaning call failed");
                TransformResult::Failure {
                    reason: error::describe(&e),
                }
            }
        }
    }
}

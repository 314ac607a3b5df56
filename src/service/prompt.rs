//! # 固定清洗指令
//!
//! 网络安全分析师视角的清洗要求：保留与威胁分析相关的正文，去除版式与元信息残留。

/// 默认采样温度，偏向逐字清洗而非改写
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// 系统指令
pub const CLEANING_PROMPT: &str = "你是一名网络安全分析师，请对文本内容进行清洗，保留与威胁分析直接相关的部分。具体移除要求如下：
移除所有非核心正文内容，包括：页眉、页脚、页码；文档元信息；免责声明、保密声明、版权说明；参考文献、以及后续阅读资料；无关的装饰符号、分隔线、水印；图表的残留信息。
保留其他所有内容。请确保输出内容整洁、连贯，适合作为语言模型输入进行进一步分析，不需要翻译。";

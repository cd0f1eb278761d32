//! 错误类型定义
//!
//! 按边界划分三类错误（检测 / 推理 / 展示），所有错误都不致命：
//! 调用方捕获后记录日志并跳过本轮，轮询循环继续运行。

use thiserror::Error;

/// 检测相关错误（页面结构不符合预期 / 脚本执行失败）
#[derive(Debug, Error)]
pub enum DetectionError {
    /// 页面脚本执行失败
    #[error("页面脚本执行失败: {0}")]
    ScriptFailed(String),
    /// 页面返回了无法解析的数据
    #[error("页面返回数据无法解析: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),
}

/// 推理相关错误（网络 / HTTP 状态 / 响应格式 / 答案越界）
#[derive(Debug, Error)]
pub enum InferenceError {
    /// 网络请求失败
    #[error("Gemini API 请求失败: {0}")]
    Request(#[from] reqwest::Error),
    /// 非 2xx HTTP 状态
    #[error("Gemini API 返回错误状态: {0}")]
    Status(u16),
    /// 响应体缺少预期字段
    #[error("Gemini 响应格式不正确")]
    MalformedResponse,
    /// 回复不是数字，或数字超出 [1, 答案数] 范围
    #[error("Gemini 返回了无效答案: {0:?}")]
    InvalidAnswer(String),
}

/// 展示相关错误（指示器元素缺失等）
#[derive(Debug, Error)]
pub enum PresentationError {
    /// 更新时内容元素不存在
    #[error("指示器内容元素不存在")]
    ContentMissing,
    /// 指示器脚本执行失败
    #[error("指示器脚本执行失败: {0}")]
    ScriptFailed(String),
}

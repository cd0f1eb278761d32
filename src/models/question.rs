//! 题目相关数据结构

use serde::Deserialize;

/// 一次检测得到的题目快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedQuestion {
    /// 题干文本（已去除首尾空白）
    pub question: String,
    /// 答案文本列表（顺序即 1-based 索引空间）
    pub answers: Vec<String>,
}

/// 页面脚本返回的原始快照（未归一化）
#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshot {
    pub question: String,
    #[serde(default)]
    pub answers: Vec<String>,
}

/// 推理结果：最可能正确的答案序号（1-based）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceResult {
    pub likely_answer: usize,
}

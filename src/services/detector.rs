//! 题目检测器 - 业务能力层
//!
//! 只负责"从页面读出题目"的能力：
//! - 两套选择器策略（常规模式优先，挑战模式兜底）
//! - 文本归一化（去除首尾空白）
//! - 基于上一题题干的去重，避免同一题重复触发推理

use crate::error::DetectionError;
use crate::infrastructure::JsExecutor;
use crate::models::question::{DetectedQuestion, RawSnapshot};
use tracing::debug;

/// 页面快照脚本
///
/// 先尝试常规模式选择器，再回退到挑战模式；挑战模式的答案元素可能
/// 包含嵌套的 `.answer-text` 子节点，优先取子节点文本。
/// 始终返回对象，found 标记是否定位到题目元素。
const SNAPSHOT_SCRIPT: &str = r#"
(() => {
    let questionElement = document.querySelector('[data-functional-selector="block-title"]');
    let answerElements = Array.from(document.querySelectorAll('[data-functional-selector^="question-choice-text-"]'));

    if (!questionElement) {
        questionElement = document.querySelector('.challenge-question');
        answerElements = Array.from(document.querySelectorAll('.challenge-answer'));
    }

    if (!questionElement) return { found: false, question: '', answers: [] };

    const answers = answerElements.map(el => {
        const answerText = el.querySelector('.answer-text');
        return (answerText || el).textContent;
    });

    return { found: true, question: questionElement.textContent, answers: answers };
})()
"#;

/// 快照脚本的返回值
#[derive(Debug, serde::Deserialize)]
struct WireSnapshot {
    found: bool,
    #[serde(default)]
    question: String,
    #[serde(default)]
    answers: Vec<String>,
}

/// 检测状态：上一次处理过的题干
///
/// 去重逻辑与 DOM 访问分离，便于单独测试。
#[derive(Debug, Default)]
pub struct DetectionState {
    last_question: String,
}

impl DetectionState {
    /// 归一化快照并执行去重
    ///
    /// 返回 `None` 的三种情况：
    /// - 题干与上一题相同（去重）
    /// - 题目存在但答案为空（此时不更新 `last_question`，
    ///   后续轮询会继续重试同一题，直到答案出现或题目变化）
    pub fn apply(&mut self, raw: RawSnapshot) -> Option<DetectedQuestion> {
        let question = raw.question.trim().to_string();

        if question == self.last_question {
            return None;
        }

        if raw.answers.is_empty() {
            debug!("题目已出现但答案尚未渲染，等待下一轮: {}", question);
            return None;
        }

        self.last_question = question.clone();

        let answers = raw
            .answers
            .iter()
            .map(|a| a.trim().to_string())
            .collect::<Vec<_>>();

        Some(DetectedQuestion { question, answers })
    }
}

/// 题目检测器
///
/// 职责：
/// - 每轮轮询读取一次页面快照
/// - 持有去重状态（每次启用时重建，保证状态清零）
/// - 不调用 LLM，不操作指示器
pub struct QuestionDetector {
    executor: JsExecutor,
    state: DetectionState,
}

impl QuestionDetector {
    /// 创建新的题目检测器（检测状态清零）
    pub fn new(executor: JsExecutor) -> Self {
        Self {
            executor,
            state: DetectionState::default(),
        }
    }

    /// 执行一轮检测
    ///
    /// 任何 DOM / CDP 错误都转换为 [`DetectionError`] 由调用方记录，
    /// 不会中断后续轮询。
    pub async fn poll(&mut self) -> Result<Option<DetectedQuestion>, DetectionError> {
        let value = self
            .executor
            .eval(SNAPSHOT_SCRIPT)
            .await
            .map_err(|e| DetectionError::ScriptFailed(e.to_string()))?;

        let snapshot: WireSnapshot = serde_json::from_value(value)?;

        if !snapshot.found {
            // 两套选择器都没找到题目元素，本轮无结果
            return Ok(None);
        }

        Ok(self.state.apply(RawSnapshot {
            question: snapshot.question,
            answers: snapshot.answers,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(question: &str, answers: &[&str]) -> RawSnapshot {
        RawSnapshot {
            question: question.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_new_question_is_reported() {
        let mut state = DetectionState::default();
        let detected = state
            .apply(snapshot("  What is 2+2?  ", &["3", "4", "5", "6"]))
            .unwrap();

        assert_eq!(detected.question, "What is 2+2?");
        assert_eq!(detected.answers, vec!["3", "4", "5", "6"]);
    }

    #[test]
    fn test_identical_question_is_deduplicated() {
        // 连续两次检测到相同题干，最多只触发一次推理
        let mut state = DetectionState::default();
        assert!(state
            .apply(snapshot("What is 2+2?", &["3", "4"]))
            .is_some());
        assert!(state
            .apply(snapshot("What is 2+2?", &["3", "4"]))
            .is_none());
        // 去重基于归一化后的文本
        assert!(state
            .apply(snapshot("  What is 2+2?\n", &["3", "4"]))
            .is_none());
    }

    #[test]
    fn test_question_without_answers_is_retried() {
        // 答案尚未渲染时不更新 last_question，下一轮仍会处理同一题
        let mut state = DetectionState::default();
        assert!(state.apply(snapshot("What is 2+2?", &[])).is_none());
        assert!(state
            .apply(snapshot("What is 2+2?", &["3", "4", "5", "6"]))
            .is_some());
    }

    #[test]
    fn test_changed_question_is_reported() {
        let mut state = DetectionState::default();
        assert!(state.apply(snapshot("第一题", &["A", "B"])).is_some());
        assert!(state.apply(snapshot("第二题", &["A", "B"])).is_some());
    }

    #[test]
    fn test_answer_text_is_trimmed() {
        let mut state = DetectionState::default();
        let detected = state
            .apply(snapshot("Q", &["  Paris \n", "London"]))
            .unwrap();
        assert_eq!(detected.answers, vec!["Paris", "London"]);
    }
}

//! Gemini 推理服务 - 业务能力层
//!
//! 只负责"判断最可能答案"的能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `reqwest` 直接调用 Gemini generateContent REST 接口
//! - 通过 `x-goog-api-key` 请求头认证
//! - 所有失败（网络 / HTTP 状态 / 响应格式 / 答案越界）都折叠为
//!   `None`，由展示层回退到白色，不重试

use crate::config::Config;
use crate::error::InferenceError;
use crate::models::question::InferenceResult;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

// ========== Gemini 响应体结构 ==========

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: String,
}

/// Gemini 客户端
///
/// 职责：
/// - 构造确定性的提示词
/// - 调用远程推理接口
/// - 解析并校验回复（1-based 答案序号）
/// - 只处理单个题目，不持有检测状态
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.gemini_api_base.clone(),
            model: config.gemini_model.clone(),
        }
    }

    /// 推理最可能正确的答案
    ///
    /// 任何失败都返回 `None` 而不是错误：调用方将"无结果"展示为
    /// 白色指示器，绝不因推理失败中断轮询。
    pub async fn infer(
        &self,
        question: &str,
        answers: &[String],
        api_key: &str,
    ) -> Option<InferenceResult> {
        match self.request_answer(question, answers, api_key).await {
            Ok(likely_answer) => {
                debug!("✓ Gemini 选择了答案 {}", likely_answer);
                Some(InferenceResult { likely_answer })
            }
            Err(e) => {
                warn!("⚠️ 推理失败，本题跳过: {}", e);
                None
            }
        }
    }

    /// 执行一次推理调用并解析回复
    async fn request_answer(
        &self,
        question: &str,
        answers: &[String],
        api_key: &str,
    ) -> Result<usize, InferenceError> {
        let prompt = build_prompt(question, answers);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );

        debug!("调用 Gemini API，模型: {}", self.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&json!({
                "contents": [{
                    "parts": [{ "text": prompt }]
                }]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::Status(status.as_u16()));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|_| InferenceError::MalformedResponse)?;

        let reply = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or(InferenceError::MalformedResponse)?;

        parse_reply(reply, answers.len())
    }
}

/// 构建单轮提示词
///
/// 答案按 1-based 序号列出，并明确要求只返回一个数字。
pub fn build_prompt(question: &str, answers: &[String]) -> String {
    let numbered = answers
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {}", i + 1, a))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Question: {}\n\nPossible answers:\n{}\n\nBased on the question and possible answers, \
which answer number (1-{}) is most likely correct? Reply with just the number. \
ONLY GIVE BACK THE NUMBER, NOTHING ELSE. DO NOT EXPLAIN YOUR ANSWER.\n\
DO NOT ADD ANYTHING ELSE TO THE RESPONSE. DO NOT SAY \"THE ANSWER IS\" OR \"THE NUMBER IS\". JUST RETURN THE NUMBER.\n\
DO NOT RETURN A JSON OBJECT. DO NOT RETURN ANY TEXT. DO NOT RETURN ANYTHING EXCEPT THE NUMBER.\n\
DO NOT RETURN A NUMBER LESS THAN 1.",
        question, numbered, answers.len()
    )
}

/// 解析 Gemini 回复：去除空白后解析为整数，并校验 1 <= n <= 答案数
fn parse_reply(reply: &str, answer_count: usize) -> Result<usize, InferenceError> {
    let trimmed = reply.trim();

    let n = trimmed
        .parse::<usize>()
        .map_err(|_| InferenceError::InvalidAnswer(trimmed.to_string()))?;

    if n < 1 || n > answer_count {
        return Err(InferenceError::InvalidAnswer(trimmed.to_string()));
    }

    Ok(n)
}

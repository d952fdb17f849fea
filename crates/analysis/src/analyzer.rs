// ABOUTME: The bias-analysis collaborator: one chat-completions call over the article text.
// ABOUTME: Builds the fixed six-item Korean prompt and returns the model reply as plain text.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::AnalysisError;

/// Only this many leading characters of the article are meaningful to the
/// analysis; the rest is dropped before the call.
pub const MAX_PROMPT_CHARS: usize = 4000;

const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
const SYSTEM_PROMPT: &str = "You are a strict and neutral media framing analyst.";

/// Credentials and endpoint for the analysis call.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl AnalyzerConfig {
    /// Read configuration from the environment.
    ///
    /// `OPENROUTER_API_KEY` is required; `OPENROUTER_URL` and `MODEL_NAME`
    /// fall back to the OpenRouter defaults.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(AnalysisError::MissingApiKey)?;
        let endpoint = std::env::var("OPENROUTER_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let model = std::env::var("MODEL_NAME")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            endpoint,
            model,
            timeout: Duration::from_secs(30),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Issues the single analysis call per article.
pub struct Analyzer {
    config: AnalyzerConfig,
    http: reqwest::Client,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Analyze an article body, returning the model reply in
    /// `"항목명: 내용"` line format, one item per line.
    pub async fn analyze(&self, article: &str) -> Result<String, AnalysisError> {
        let prompt = build_prompt(article);
        debug!(chars = prompt.chars().count(), "issuing analysis request");

        let payload = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt},
            ],
        });

        let response = self
            .http
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json; charset=utf-8")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Malformed(e.to_string()))?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AnalysisError::Malformed("reply has no choices".to_string()))?;

        Ok(content)
    }
}

/// The fixed six-item prompt, over at most [`MAX_PROMPT_CHARS`] characters
/// of the article.
fn build_prompt(article: &str) -> String {
    let excerpt: String = article.chars().take(MAX_PROMPT_CHARS).collect();
    format!(
        "다음 뉴스 기사 본문을 분석하여 아래 항목을 '항목명: 내용' 형식으로 간결하게 작성해줘.\n\
         \n\
         1. 프레이밍 방식 및 관점\n\
         2. 감정적 표현 및 선동 요소\n\
         3. 사실과 의견 구분의 명확성\n\
         4. 정보의 균형성 및 누락 여부\n\
         5. 출처와 근거의 신뢰도\n\
         6. 종합 위험도 평가 (낮음/보통/높음) 및 이유\n\
         \n\
         [뉴스 본문]\n\
         {}",
        excerpt
    )
}

//! Groq adapter (OpenAI-compatible chat completions API).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CallOpts, LlmError, LlmProvider, ProviderKind};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Groq caps completion tokens well below what Gemini accepts.
const GROQ_MAX_TOKENS: u32 = 8192;

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorBody,
}

#[derive(Debug, Deserialize)]
struct GroqErrorBody {
    message: String,
}

pub struct GroqProvider {
    http: reqwest::Client,
    api_key: String,
}

impl GroqProvider {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    async fn invoke(
        &self,
        model: &str,
        prompt: &str,
        opts: CallOpts,
    ) -> Result<String, LlmError> {
        let request_body = GroqRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: opts.max_tokens.min(GROQ_MAX_TOKENS),
            temperature: opts.temperature,
        };

        let response = self
            .http
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GroqError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GroqResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_content_path_deserializes() {
        let json = r#"{
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "[{\"id\":1}]"}}
            ],
            "usage": {"total_tokens": 10}
        }"#;
        let parsed: GroqResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("[{\"id\":1}]")
        );
    }

    #[test]
    fn test_max_tokens_is_clamped() {
        let request = GroqRequest {
            model: "llama-3.3-70b-versatile",
            messages: vec![],
            max_tokens: 20_000_u32.min(GROQ_MAX_TOKENS),
            temperature: 0.7,
        };
        assert_eq!(request.max_tokens, 8192);
    }

    #[test]
    fn test_error_envelope_extracts_message() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "tokens"}}"#;
        let parsed: GroqError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "Rate limit reached");
    }
}

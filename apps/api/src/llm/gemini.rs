//! Google Gemini adapter (`generateContent` REST API).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CallOpts, LlmError, LlmProvider, ProviderKind};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
    /// Gemini's native JSON mode; the only vendor here that has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn invoke(
        &self,
        model: &str,
        prompt: &str,
        opts: CallOpts,
    ) -> Result<String, LlmError> {
        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: opts.max_tokens,
                temperature: opts.temperature,
                response_mime_type: opts.json_mode.then_some("application/json"),
            },
        };

        let response = self
            .http
            .post(format!("{GEMINI_API_BASE}/{model}:generateContent"))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GeminiResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
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
    fn test_response_text_path_deserializes() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\": 1}"}], "role": "model"}}
            ]
        }"#;
        let parsed: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.candidates[0].content.parts[0].text.as_deref(),
            Some("{\"a\": 1}")
        );
    }

    #[test]
    fn test_json_mode_sets_response_mime_type() {
        let config = GenerationConfig {
            max_output_tokens: 100,
            temperature: 0.5,
            response_mime_type: Some("application/json"),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["responseMimeType"], "application/json");
        assert_eq!(json["maxOutputTokens"], 100);
    }

    #[test]
    fn test_plain_mode_omits_response_mime_type() {
        let config = GenerationConfig {
            max_output_tokens: 100,
            temperature: 0.5,
            response_mime_type: None,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("responseMimeType").is_none());
    }

    #[test]
    fn test_error_envelope_extracts_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let parsed: GeminiError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "API key not valid");
    }
}

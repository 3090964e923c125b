//! LLM access layer — the single point of entry for all provider calls.
//!
//! No other module may talk to a vendor API directly. Provider-specific
//! wire formats live in one adapter each behind [`LlmProvider`]; everything
//! above the trait (retry, backoff, tolerant JSON recovery) is shared.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::repair::{self, ParseError};

pub mod cohere;
pub mod gemini;
pub mod groq;

const MAX_RETRIES: u32 = 3;

/// Hosted LLM vendors the service can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Groq,
    Cohere,
}

impl ProviderKind {
    /// Models selectable for this provider, default first.
    pub fn models(self) -> &'static [&'static str] {
        match self {
            ProviderKind::Gemini => &[
                "gemini-2.0-flash",
                "gemini-2.0-flash-lite",
                "gemini-1.5-flash",
                "gemini-1.5-flash-8b",
                "gemini-1.5-pro",
            ],
            ProviderKind::Groq => &[
                "llama-3.3-70b-versatile",
                "llama-3.1-8b-instant",
                "llama3-70b-8192",
                "llama3-8b-8192",
                "mixtral-8x7b-32768",
                "gemma2-9b-it",
            ],
            ProviderKind::Cohere => &["command-r-plus", "command-r", "command", "command-light"],
        }
    }

    pub fn default_model(self) -> &'static str {
        self.models()[0]
    }

    /// Where users create a key for this provider. Surfaced in session
    /// status so clients can link to it.
    pub fn key_url(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://aistudio.google.com/app/apikey",
            ProviderKind::Groq => "https://console.groq.com/keys",
            ProviderKind::Cohere => "https://dashboard.cohere.com/api-keys",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Groq => "groq",
            ProviderKind::Cohere => "cohere",
        }
    }
}

/// Per-call generation parameters, as the advice layer tunes them.
#[derive(Debug, Clone, Copy)]
pub struct CallOpts {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Ask the provider for a JSON response where the vendor supports it
    /// (Gemini only — Groq and Cohere adapters ignore the flag).
    pub json_mode: bool,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("JSON recovery failed: {0}")]
    Recovery(#[from] ParseError),

    #[error("response shape mismatch: {0}")]
    Shape(#[from] serde_json::Error),
}

impl LlmError {
    /// Transient failures worth another attempt: transport errors, 429, 5xx.
    fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(_) => true,
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// One adapter per vendor SDK. Implementations own the wire format and
/// return the raw response text; they do not retry or parse JSON.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn invoke(&self, model: &str, prompt: &str, opts: CallOpts)
        -> Result<String, LlmError>;
}

/// Builds the adapter for a provider choice. Keys are resolved per call by
/// the session layer, so adapters are cheap throwaway values over a shared
/// HTTP client.
pub fn provider_for(
    kind: ProviderKind,
    http: reqwest::Client,
    api_key: String,
) -> Box<dyn LlmProvider> {
    match kind {
        ProviderKind::Gemini => Box::new(gemini::GeminiProvider::new(http, api_key)),
        ProviderKind::Groq => Box::new(groq::GroqProvider::new(http, api_key)),
        ProviderKind::Cohere => Box::new(cohere::CohereProvider::new(http, api_key)),
    }
}

/// Provider-agnostic client used by the advice operations. Wraps one
/// adapter with retry/backoff and tolerant structured-output recovery.
pub struct LlmClient {
    provider: Box<dyn LlmProvider>,
    model: String,
}

impl LlmClient {
    pub fn new(provider: Box<dyn LlmProvider>, model: String) -> Self {
        Self { provider, model }
    }

    /// Calls the provider, retrying transient failures with exponential
    /// backoff (1s, 2s).
    pub async fn call(&self, prompt: &str, opts: CallOpts) -> Result<String, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    provider = self.provider.kind().as_str(),
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self.provider.invoke(&self.model, prompt, opts).await {
                Ok(text) => {
                    debug!(
                        provider = self.provider.kind().as_str(),
                        model = %self.model,
                        chars = text.len(),
                        "LLM call succeeded"
                    );
                    return Ok(text);
                }
                Err(e) if e.is_retryable() => {
                    warn!(provider = self.provider.kind().as_str(), "LLM API error: {e}");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Calls the LLM and recovers a typed value from the response text via
    /// the tolerant parser. The prompt must instruct the model to return
    /// JSON matching `T`.
    pub async fn call_structured<T: DeserializeOwned>(
        &self,
        prompt: &str,
        opts: CallOpts,
    ) -> Result<T, LlmError> {
        let text = self.call(prompt, opts).await?;
        let value = repair::parse(&text)?;

        // Lossy array recovery keeps the batch alive; log what it cost.
        if let Value::Array(items) = &value {
            let seen = repair::top_level_object_count(&text);
            if seen > items.len() {
                warn!(
                    provider = self.provider.kind().as_str(),
                    dropped = seen - items.len(),
                    kept = items.len(),
                    "recovered array dropped malformed elements"
                );
            }
        }

        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_heads_catalog() {
        assert_eq!(ProviderKind::Gemini.default_model(), "gemini-2.0-flash");
        assert_eq!(ProviderKind::Groq.default_model(), "llama-3.3-70b-versatile");
        assert_eq!(ProviderKind::Cohere.default_model(), "command-r-plus");
    }

    #[test]
    fn test_provider_kind_serde_round_trip() {
        let kind: ProviderKind = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(kind, ProviderKind::Gemini);
        assert_eq!(serde_json::to_string(&ProviderKind::Cohere).unwrap(), "\"cohere\"");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(LlmError::Api {
            status: 429,
            message: String::new()
        }
        .is_retryable());
        assert!(LlmError::Api {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(!LlmError::Api {
            status: 400,
            message: String::new()
        }
        .is_retryable());
        assert!(!LlmError::EmptyContent.is_retryable());
    }
}

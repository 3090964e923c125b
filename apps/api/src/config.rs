use anyhow::{Context, Result};

use crate::llm::ProviderKind;

/// Application configuration loaded from environment variables.
///
/// Provider keys are all optional: a session can always bring its own key,
/// and server-side fallback keys only enable the free tier.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub gemini_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub cohere_api_key: Option<String>,
    /// LLM calls allowed per session on a server fallback key.
    pub free_use_limit: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY").or_else(|| optional_env("GOOGLE_API_KEY")),
            groq_api_key: optional_env("GROQ_API_KEY"),
            cohere_api_key: optional_env("COHERE_API_KEY"),
            free_use_limit: std::env::var("FREE_USE_LIMIT")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<u32>()
                .context("FREE_USE_LIMIT must be a number")?,
        })
    }

    /// Server-side key used when the session has none for this provider.
    pub fn fallback_key(&self, provider: ProviderKind) -> Option<&str> {
        match provider {
            ProviderKind::Gemini => self.gemini_api_key.as_deref(),
            ProviderKind::Groq => self.groq_api_key.as_deref(),
            ProviderKind::Cohere => self.cohere_api_key.as_deref(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_key_per_provider() {
        let config = Config {
            gemini_api_key: Some("g-key".into()),
            cohere_api_key: Some("c-key".into()),
            ..Config::default()
        };
        assert_eq!(config.fallback_key(ProviderKind::Gemini), Some("g-key"));
        assert_eq!(config.fallback_key(ProviderKind::Groq), None);
        assert_eq!(config.fallback_key(ProviderKind::Cohere), Some("c-key"));
    }
}

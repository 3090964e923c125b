//! Per-user session state: provider choice, API keys, free-tier quota,
//! and a bounded history of analyses.
//!
//! Nothing here is persisted — keys and history live only as long as the
//! session, which is the privacy promise the product makes. State is held
//! in an explicit store on `AppState` and threaded into handlers, never
//! read from globals.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm::ProviderKind;

/// Most recent analyses kept per session.
const MAX_HISTORY: usize = 20;
const SUMMARY_LEN: usize = 50;
const INPUT_EXCERPT_LEN: usize = 500;

/// One career analysis kept for the session's history tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    pub input_excerpt: String,
    pub analysis: Value,
    pub context: Value,
}

impl HistoryRecord {
    pub fn new(input_text: &str, summary_source: &str, analysis: Value, context: Value) -> Self {
        let mut summary: String = summary_source.chars().take(SUMMARY_LEN).collect();
        summary.push_str("...");
        Self {
            timestamp: Utc::now(),
            summary,
            input_excerpt: input_text.chars().take(INPUT_EXCERPT_LEN).collect(),
            analysis,
            context,
        }
    }
}

/// Everything one user session carries between requests.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: Uuid,
    pub provider: ProviderKind,
    pub model: String,
    api_keys: HashMap<ProviderKind, String>,
    pub free_uses: u32,
    pub history: Vec<HistoryRecord>,
    pub created_at: DateTime<Utc>,
}

impl SessionContext {
    fn new() -> Self {
        let provider = ProviderKind::Gemini;
        Self {
            id: Uuid::new_v4(),
            provider,
            model: provider.default_model().to_string(),
            api_keys: HashMap::new(),
            free_uses: 0,
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Switches the active provider, resetting the model to that provider's
    /// default unless a valid model for it is named.
    pub fn set_provider(
        &mut self,
        provider: ProviderKind,
        model: Option<String>,
    ) -> Result<(), AppError> {
        let model = match model {
            Some(m) => {
                if !provider.models().contains(&m.as_str()) {
                    return Err(AppError::Validation(format!(
                        "unknown model '{m}' for provider {}",
                        provider.as_str()
                    )));
                }
                m
            }
            None => provider.default_model().to_string(),
        };
        self.provider = provider;
        self.model = model;
        Ok(())
    }

    pub fn set_api_key(&mut self, provider: ProviderKind, key: String) {
        if key.is_empty() {
            self.api_keys.remove(&provider);
        } else {
            self.api_keys.insert(provider, key);
        }
    }

    /// The session's own key for a provider, if one was supplied.
    pub fn own_key(&self, provider: ProviderKind) -> Option<&str> {
        self.api_keys.get(&provider).map(String::as_str)
    }

    pub fn has_own_key(&self) -> bool {
        self.api_keys.contains_key(&self.provider)
    }

    fn push_history(&mut self, record: HistoryRecord) {
        self.history.push(record);
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
    }
}

/// Resolved credentials and model for one LLM call.
#[derive(Debug, Clone)]
pub struct CallGrant {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    /// False when the call rides on a server fallback key, which is what
    /// the free-tier quota meters.
    pub own_key: bool,
}

/// In-memory session registry shared across handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
}

impl SessionStore {
    pub async fn create(&self) -> SessionContext {
        let session = SessionContext::new();
        self.inner
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionContext, AppError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Runs a mutation against a session under the write lock.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionContext) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        f(session)
    }

    /// Resolves provider, model, and key for a call and enforces the
    /// free-tier gate. Key order: session's own key, then server fallback.
    pub async fn checkout(&self, id: Uuid, config: &Config) -> Result<CallGrant, AppError> {
        let session = self.get(id).await?;
        let provider = session.provider;

        if let Some(key) = session.own_key(provider) {
            return Ok(CallGrant {
                provider,
                model: session.model.clone(),
                api_key: key.to_string(),
                own_key: true,
            });
        }

        let key = config.fallback_key(provider).ok_or_else(|| {
            AppError::MissingKey(format!(
                "no API key for {}; add one via {}",
                provider.as_str(),
                provider.key_url()
            ))
        })?;

        if session.free_uses >= config.free_use_limit {
            return Err(AppError::QuotaExceeded);
        }

        Ok(CallGrant {
            provider,
            model: session.model.clone(),
            api_key: key.to_string(),
            own_key: false,
        })
    }

    /// Charges a successful call against the free tier. Own-key calls are
    /// never metered.
    pub async fn consume(&self, id: Uuid, grant: &CallGrant) -> Result<(), AppError> {
        if grant.own_key {
            return Ok(());
        }
        self.update(id, |session| {
            session.free_uses += 1;
            Ok(())
        })
        .await
    }

    pub async fn push_history(&self, id: Uuid, record: HistoryRecord) -> Result<(), AppError> {
        self.update(id, |session| {
            session.push_history(record);
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_with_gemini_key() -> Config {
        Config {
            gemini_api_key: Some("server-key".into()),
            free_use_limit: 5,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_new_session_defaults_to_gemini() {
        let store = SessionStore::default();
        let session = store.create().await;
        assert_eq!(session.provider, ProviderKind::Gemini);
        assert_eq!(session.model, "gemini-2.0-flash");
        assert_eq!(session.free_uses, 0);
    }

    #[tokio::test]
    async fn test_checkout_prefers_own_key_and_skips_quota() {
        let store = SessionStore::default();
        let session = store.create().await;
        store
            .update(session.id, |s| {
                s.set_api_key(ProviderKind::Gemini, "my-key".into());
                s.free_uses = 99;
                Ok(())
            })
            .await
            .unwrap();

        let grant = store
            .checkout(session.id, &config_with_gemini_key())
            .await
            .unwrap();
        assert!(grant.own_key);
        assert_eq!(grant.api_key, "my-key");
    }

    #[tokio::test]
    async fn test_fallback_key_is_metered_to_limit() {
        let store = SessionStore::default();
        let session = store.create().await;
        let config = config_with_gemini_key();

        for _ in 0..5 {
            let grant = store.checkout(session.id, &config).await.unwrap();
            assert!(!grant.own_key);
            store.consume(session.id, &grant).await.unwrap();
        }

        let err = store.checkout(session.id, &config).await.unwrap_err();
        assert!(matches!(err, AppError::QuotaExceeded));
    }

    #[tokio::test]
    async fn test_checkout_without_any_key_errors() {
        let store = SessionStore::default();
        let session = store.create().await;
        let err = store
            .checkout(session.id, &Config::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingKey(_)));
    }

    #[tokio::test]
    async fn test_own_key_calls_are_not_metered() {
        let store = SessionStore::default();
        let session = store.create().await;
        let grant = CallGrant {
            provider: ProviderKind::Gemini,
            model: "gemini-2.0-flash".into(),
            api_key: "my-key".into(),
            own_key: true,
        };
        store.consume(session.id, &grant).await.unwrap();
        assert_eq!(store.get(session.id).await.unwrap().free_uses, 0);
    }

    #[tokio::test]
    async fn test_switch_provider_resets_model_to_default() {
        let store = SessionStore::default();
        let session = store.create().await;
        store
            .update(session.id, |s| s.set_provider(ProviderKind::Groq, None))
            .await
            .unwrap();
        let session = store.get(session.id).await.unwrap();
        assert_eq!(session.provider, ProviderKind::Groq);
        assert_eq!(session.model, "llama-3.3-70b-versatile");
    }

    #[tokio::test]
    async fn test_switch_provider_rejects_unknown_model() {
        let store = SessionStore::default();
        let session = store.create().await;
        let err = store
            .update(session.id, |s| {
                s.set_provider(ProviderKind::Cohere, Some("gpt-4".into()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let store = SessionStore::default();
        let session = store.create().await;
        for i in 0..25 {
            let record = HistoryRecord::new(
                "profile text",
                &format!("analysis number {i}"),
                json!({"i": i}),
                json!({}),
            );
            store.push_history(session.id, record).await.unwrap();
        }
        let session = store.get(session.id).await.unwrap();
        assert_eq!(session.history.len(), 20);
        // Oldest records were evicted.
        assert_eq!(session.history[0].analysis["i"], 5);
    }

    #[test]
    fn test_history_record_truncates_summary_and_input() {
        let long_summary = "s".repeat(200);
        let long_input = "i".repeat(2000);
        let record = HistoryRecord::new(&long_input, &long_summary, json!({}), json!({}));
        assert_eq!(record.summary.len(), 53); // 50 chars + "..."
        assert_eq!(record.input_excerpt.len(), 500);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::default();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

//! Session lifecycle handlers: create, inspect, switch provider, store
//! keys, read history.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm::ProviderKind;
use crate::session::{HistoryRecord, SessionContext};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub provider: ProviderKind,
    pub model: String,
    /// Free calls left on the server fallback key; `null` when the session
    /// brings its own key (unlimited).
    pub free_uses_remaining: Option<u32>,
    pub has_own_key: bool,
    pub available_models: Vec<String>,
    pub key_url: &'static str,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SwitchProviderRequest {
    pub provider: ProviderKind,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetKeyRequest {
    pub provider: ProviderKind,
    /// Empty string clears the stored key.
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<HistoryRecord>,
}

fn session_response(session: &SessionContext, free_use_limit: u32) -> SessionResponse {
    let has_own_key = session.has_own_key();
    SessionResponse {
        session_id: session.id,
        provider: session.provider,
        model: session.model.clone(),
        free_uses_remaining: (!has_own_key)
            .then(|| free_use_limit.saturating_sub(session.free_uses)),
        has_own_key,
        available_models: session
            .provider
            .models()
            .iter()
            .map(|m| m.to_string())
            .collect(),
        key_url: session.provider.key_url(),
        created_at: session.created_at,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.create().await;
    Ok(Json(session_response(&session, state.config.free_use_limit)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    Ok(Json(session_response(&session, state.config.free_use_limit)))
}

/// PATCH /api/v1/sessions/:id/provider
pub async fn handle_switch_provider(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SwitchProviderRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    state
        .sessions
        .update(session_id, |session| {
            session.set_provider(request.provider, request.model.clone())
        })
        .await?;
    let session = state.sessions.get(session_id).await?;
    Ok(Json(session_response(&session, state.config.free_use_limit)))
}

/// PUT /api/v1/sessions/:id/key
pub async fn handle_set_key(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetKeyRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    state
        .sessions
        .update(session_id, |session| {
            session.set_api_key(request.provider, request.api_key.clone());
            Ok(())
        })
        .await?;
    let session = state.sessions.get(session_id).await?;
    Ok(Json(session_response(&session, state.config.free_use_limit)))
}

/// GET /api/v1/sessions/:id/history
pub async fn handle_get_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    Ok(Json(HistoryResponse {
        records: session.history,
    }))
}

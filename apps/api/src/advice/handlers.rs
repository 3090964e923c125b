//! Axum route handlers for the advice, interview, and exam APIs.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advice::career::{self, CareerAnalysis, CareerContext};
use crate::advice::exam::{self, PaperSection, ResourceGuide};
use crate::advice::interview::{self, AnswerFeedback, InterviewQuestion, InterviewVerdict};
use crate::advice::resume::{self, AtsResume, ResumeProfile};
use crate::errors::AppError;
use crate::llm::{provider_for, LlmClient};
use crate::session::{CallGrant, HistoryRecord};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CareerAdviceRequest {
    pub session_id: Uuid,
    pub profile_text: String,
    #[serde(default)]
    pub context: CareerContext,
}

#[derive(Debug, Serialize)]
pub struct CareerAdviceResponse {
    pub analysis: CareerAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct BuildResumeRequest {
    pub session_id: Uuid,
    pub profile: ResumeProfile,
}

#[derive(Debug, Serialize)]
pub struct BuildResumeResponse {
    pub result: AtsResume,
}

#[derive(Debug, Deserialize)]
pub struct InterviewQuestionsRequest {
    pub session_id: Uuid,
    pub role: String,
    pub level: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewQuestionsResponse {
    pub questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateAnswerRequest {
    pub session_id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub ideal_points: Vec<String>,
    pub role: String,
    #[serde(default)]
    pub companies: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateAnswerResponse {
    pub feedback: AnswerFeedback,
}

#[derive(Debug, Deserialize)]
pub struct FinalVerdictRequest {
    pub session_id: Uuid,
    pub role: String,
    pub level: String,
    #[serde(default)]
    pub companies: Vec<String>,
    pub feedback: Vec<AnswerFeedback>,
}

#[derive(Debug, Serialize)]
pub struct FinalVerdictResponse {
    pub verdict: InterviewVerdict,
}

#[derive(Debug, Deserialize)]
pub struct ExamResourcesRequest {
    pub session_id: Uuid,
    pub company: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct ExamResourcesResponse {
    pub guide: ResourceGuide,
}

fn default_question_count() -> u32 {
    15
}

#[derive(Debug, Deserialize)]
pub struct ExamPaperRequest {
    pub session_id: Uuid,
    pub company: String,
    pub role: String,
    #[serde(default = "default_question_count")]
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct ExamPaperResponse {
    pub sections: Vec<PaperSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// Resolves the session's provider/model/key into a ready LLM client.
async fn client_for(
    state: &AppState,
    session_id: Uuid,
) -> Result<(LlmClient, CallGrant), AppError> {
    let grant = state.sessions.checkout(session_id, &state.config).await?;
    let provider = provider_for(grant.provider, state.http.clone(), grant.api_key.clone());
    let client = LlmClient::new(provider, grant.model.clone());
    Ok((client, grant))
}

/// POST /api/v1/advice/career
///
/// Full career analysis for a profile. Successful analyses are charged to
/// the free tier (if applicable) and appended to session history.
pub async fn handle_career_advice(
    State(state): State<AppState>,
    Json(request): Json<CareerAdviceRequest>,
) -> Result<Json<CareerAdviceResponse>, AppError> {
    if request.profile_text.trim().is_empty() {
        return Err(AppError::Validation(
            "profile_text cannot be empty".to_string(),
        ));
    }

    let (llm, grant) = client_for(&state, request.session_id).await?;
    let analysis = career::career_advice(&llm, &request.profile_text, &request.context).await?;
    state.sessions.consume(request.session_id, &grant).await?;

    let record = HistoryRecord::new(
        &request.profile_text,
        &analysis.profile_summary,
        serde_json::to_value(&analysis).map_err(anyhow::Error::from)?,
        serde_json::to_value(&request.context).map_err(anyhow::Error::from)?,
    );
    state
        .sessions
        .push_history(request.session_id, record)
        .await?;

    Ok(Json(CareerAdviceResponse { analysis }))
}

/// POST /api/v1/advice/resume
pub async fn handle_build_resume(
    State(state): State<AppState>,
    Json(request): Json<BuildResumeRequest>,
) -> Result<Json<BuildResumeResponse>, AppError> {
    if request.profile.target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "profile.target_role cannot be empty".to_string(),
        ));
    }

    let (llm, grant) = client_for(&state, request.session_id).await?;
    let result = resume::build_resume(&llm, &request.profile).await?;
    state.sessions.consume(request.session_id, &grant).await?;

    Ok(Json(BuildResumeResponse { result }))
}

/// POST /api/v1/interview/questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(request): Json<InterviewQuestionsRequest>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }

    let (llm, grant) = client_for(&state, request.session_id).await?;
    let questions = interview::generate_questions(&llm, &request.role, &request.level).await?;
    state.sessions.consume(request.session_id, &grant).await?;

    Ok(Json(InterviewQuestionsResponse { questions }))
}

/// POST /api/v1/interview/evaluate
pub async fn handle_evaluate_answer(
    State(state): State<AppState>,
    Json(request): Json<EvaluateAnswerRequest>,
) -> Result<Json<EvaluateAnswerResponse>, AppError> {
    if request.answer.trim().is_empty() {
        return Err(AppError::Validation("answer cannot be empty".to_string()));
    }

    let (llm, grant) = client_for(&state, request.session_id).await?;
    let feedback = interview::evaluate_answer(
        &llm,
        &request.question,
        &request.answer,
        &request.ideal_points,
        &request.role,
        &request.companies,
    )
    .await?;
    state.sessions.consume(request.session_id, &grant).await?;

    Ok(Json(EvaluateAnswerResponse { feedback }))
}

/// POST /api/v1/interview/verdict
pub async fn handle_final_verdict(
    State(state): State<AppState>,
    Json(request): Json<FinalVerdictRequest>,
) -> Result<Json<FinalVerdictResponse>, AppError> {
    if request.feedback.is_empty() {
        return Err(AppError::Validation(
            "feedback cannot be empty".to_string(),
        ));
    }

    let (llm, grant) = client_for(&state, request.session_id).await?;
    let verdict = interview::final_verdict(
        &llm,
        &request.role,
        &request.level,
        &request.companies,
        &request.feedback,
    )
    .await?;
    state.sessions.consume(request.session_id, &grant).await?;

    Ok(Json(FinalVerdictResponse { verdict }))
}

/// POST /api/v1/exam/resources
pub async fn handle_exam_resources(
    State(state): State<AppState>,
    Json(request): Json<ExamResourcesRequest>,
) -> Result<Json<ExamResourcesResponse>, AppError> {
    if request.company.trim().is_empty() {
        return Err(AppError::Validation("company cannot be empty".to_string()));
    }

    let (llm, grant) = client_for(&state, request.session_id).await?;
    let guide = exam::find_resources(&llm, &request.company, &request.role).await?;
    state.sessions.consume(request.session_id, &grant).await?;

    Ok(Json(ExamResourcesResponse { guide }))
}

/// POST /api/v1/exam/paper
pub async fn handle_exam_paper(
    State(state): State<AppState>,
    Json(request): Json<ExamPaperRequest>,
) -> Result<Json<ExamPaperResponse>, AppError> {
    if request.company.trim().is_empty() {
        return Err(AppError::Validation("company cannot be empty".to_string()));
    }
    if !(3..=60).contains(&request.count) {
        return Err(AppError::Validation(
            "count must be between 3 and 60".to_string(),
        ));
    }

    let (llm, grant) = client_for(&state, request.session_id).await?;
    let sections =
        exam::generate_paper(&llm, &request.company, &request.role, request.count).await?;
    state.sessions.consume(request.session_id, &grant).await?;

    Ok(Json(ExamPaperResponse { sections }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_paper_request_defaults_count() {
        let json = format!(
            r#"{{"session_id": "{}", "company": "TCS", "role": "Ninja"}}"#,
            Uuid::new_v4()
        );
        let request: ExamPaperRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.count, 15);
    }

    #[test]
    fn test_career_request_context_is_optional() {
        let json = format!(
            r#"{{"session_id": "{}", "profile_text": "3 years in QA"}}"#,
            Uuid::new_v4()
        );
        let request: CareerAdviceRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.context.location, "India - Metro");
    }
}

pub mod health;
pub mod sessions;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::advice::handlers;
use crate::ingest;
use crate::jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session API
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route("/api/v1/sessions/:id", get(sessions::handle_get_session))
        .route(
            "/api/v1/sessions/:id/provider",
            patch(sessions::handle_switch_provider),
        )
        .route("/api/v1/sessions/:id/key", put(sessions::handle_set_key))
        .route(
            "/api/v1/sessions/:id/history",
            get(sessions::handle_get_history),
        )
        // Advice API
        .route("/api/v1/advice/career", post(handlers::handle_career_advice))
        .route("/api/v1/advice/resume", post(handlers::handle_build_resume))
        // Mock interview API
        .route(
            "/api/v1/interview/questions",
            post(handlers::handle_interview_questions),
        )
        .route(
            "/api/v1/interview/evaluate",
            post(handlers::handle_evaluate_answer),
        )
        .route(
            "/api/v1/interview/verdict",
            post(handlers::handle_final_verdict),
        )
        // Exam (PYQ) API
        .route(
            "/api/v1/exam/resources",
            post(handlers::handle_exam_resources),
        )
        .route("/api/v1/exam/paper", post(handlers::handle_exam_paper))
        // Ingestion & job links
        .route(
            "/api/v1/ingest/resume",
            // Axum's default body cap is below our own upload limit; the
            // precise 5MB check stays in the extraction path.
            post(ingest::handle_resume_upload)
                .layer(DefaultBodyLimit::max(ingest::MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        .route("/api/v1/jobs/links", get(jobs::handle_job_links))
        .with_state(state)
}

//! Resume PDF ingestion: multipart upload → plain text for analysis.

use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;

/// Oversized files are rejected before the PDF parser sees them.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub chars: usize,
}

/// Extracts text from an in-memory PDF.
pub fn extract_resume_text(data: &[u8]) -> Result<String, AppError> {
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(
            "file too large; upload a resume under 5MB".to_string(),
        ));
    }

    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::UnprocessableEntity(format!("PDF extraction failed: {e}")))?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "no extractable text in PDF; is it a scanned image?".to_string(),
        ));
    }
    Ok(text)
}

/// POST /api/v1/ingest/resume
///
/// Multipart upload with a single `file` field containing the PDF.
pub async fn handle_resume_upload(
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        debug!(bytes = data.len(), "resume upload received");

        // Extraction is CPU-bound; keep it off the async workers.
        let text =
            tokio::task::spawn_blocking(move || extract_resume_text(&data))
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

        let chars = text.chars().count();
        return Ok(Json(ExtractResponse { text, chars }));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

//! Axum route handlers for the resume optimization API.

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, rejection::PathRejection, Multipart, Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::errors::AppError;
use crate::parser::UploadedResume;
use crate::render::DocumentFormat;
use crate::resume::pipeline::{optimize_resume, OptimizeResponse};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume_file";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/optimize-resume/
///
/// Multipart form: `resume_file` (PDF or DOCX) and `job_description` (text).
pub async fn handle_optimize_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?;
    let (resume, job_description) = read_optimize_form(&mut multipart).await?;

    let response = optimize_resume(
        state.optimizer.as_ref(),
        &state.artifacts,
        resume,
        job_description,
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/download/:file_type/:filename
///
/// Returns a generated file under a fixed display name. A missing file is
/// reported before an invalid `file_type`.
pub async fn handle_download(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Response, AppError> {
    // Undecodable path segments can never name an issued file.
    let Path((file_type, filename)) = path.map_err(|e| {
        warn!("Rejected download path: {e}");
        AppError::NotFound("File not found.".to_string())
    })?;

    let path = state
        .artifacts
        .resolve(&filename)
        .await
        .ok_or_else(|| AppError::NotFound("File not found.".to_string()))?;

    let format = DocumentFormat::from_extension(&file_type)
        .ok_or_else(|| AppError::Validation("Invalid file type.".to_string()))?;

    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let headers = [
        (CONTENT_TYPE, format.content_type().to_string()),
        (
            CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"Optimized_Resume.{}\"",
                format.extension()
            ),
        ),
    ];
    Ok((headers, bytes).into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Form intake
// ────────────────────────────────────────────────────────────────────────────

async fn read_optimize_form(
    multipart: &mut Multipart,
) -> Result<(UploadedResume, String), AppError> {
    let mut resume: Option<UploadedResume> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            RESUME_FIELD => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read {RESUME_FIELD}: {e}"))
                })?;
                resume = Some(UploadedResume { file_name, content });
            }
            JOB_DESCRIPTION_FIELD => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read {JOB_DESCRIPTION_FIELD}: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {
                // Drain unknown fields so the stream can advance.
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?;
            }
        }
    }

    let resume =
        resume.ok_or_else(|| AppError::Validation(format!("{RESUME_FIELD} is required")))?;
    let job_description = job_description
        .ok_or_else(|| AppError::Validation(format!("{JOB_DESCRIPTION_FIELD} is required")))?;
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "{JOB_DESCRIPTION_FIELD} cannot be empty"
        )));
    }

    Ok((resume, job_description))
}

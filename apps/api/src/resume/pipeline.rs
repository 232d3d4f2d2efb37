//! Resume optimization pipeline: sequences parsing, the LLM call, and rendering.
//!
//! Flow: extract_text → empty-text check → optimizer.optimize →
//!       allocate artifact id → write DOCX + PDF → response.
//!
//! This is the single place where stage failures are classified into `AppError`.

use anyhow::{anyhow, Context};
use serde::Serialize;
use tracing::{info, warn};

use crate::artifacts::{ArtifactStore, DownloadLinks, GeneratedArtifact};
use crate::errors::AppError;
use crate::optimization::{OptimizationOutcome, OptimizationRequest, ResumeOptimizer};
use crate::parser::{extract_text, ParseError, UploadedResume};
use crate::render::{write_document, DocumentFormat, RenderError};

const EMPTY_TEXT_MESSAGE: &str =
    "Could not extract text from the resume. Please ensure it's not an image-based file.";

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub optimized_resume_text: String,
    pub changes_summary: Vec<String>,
    pub download_links: DownloadLinks,
}

/// Runs the full optimization pipeline for one uploaded resume.
///
/// No artifact is allocated or written unless the optimizer succeeded.
pub async fn optimize_resume(
    optimizer: &dyn ResumeOptimizer,
    store: &ArtifactStore,
    resume: UploadedResume,
    job_description: String,
) -> Result<OptimizeResponse, AppError> {
    // Step 1: Extract text
    let file_name = resume.file_name.clone();
    let resume_text = tokio::task::spawn_blocking(move || extract_text(&resume))
        .await
        .context("Resume parsing task failed")?
        .map_err(|e| classify_parse_error(&file_name, e))?;

    if resume_text.trim().is_empty() {
        warn!("No text extracted from '{file_name}'");
        return Err(AppError::Validation(EMPTY_TEXT_MESSAGE.to_string()));
    }
    info!(
        "Extracted {} chars from '{file_name}'",
        resume_text.chars().count()
    );

    // Step 2: Optimize
    let request = OptimizationRequest {
        resume_text,
        job_description,
    };
    let result = match optimizer.optimize(&request).await {
        OptimizationOutcome::Optimized(result) => result,
        OptimizationOutcome::Failed(failure) => {
            warn!("Optimization failed: {:?}", failure.changes_summary);
            return Err(AppError::Optimization(failure.reason));
        }
    };

    // Step 3: Render both documents under a fresh identifier
    let artifact = store.allocate();
    write_artifact(&artifact, &result.optimized_resume_text).await?;
    info!("Generated artifact {}", artifact.id);

    Ok(OptimizeResponse {
        download_links: artifact.download_links(),
        optimized_resume_text: result.optimized_resume_text,
        changes_summary: result.changes_summary,
    })
}

fn classify_parse_error(file_name: &str, error: ParseError) -> AppError {
    match error {
        ParseError::UnsupportedFormat => {
            warn!("Rejected upload '{file_name}': unsupported format");
            AppError::Validation(error.to_string())
        }
        other => AppError::Internal(
            anyhow!(other).context(format!("Failed to parse resume '{file_name}'")),
        ),
    }
}

async fn write_artifact(artifact: &GeneratedArtifact, text: &str) -> Result<(), AppError> {
    let target = artifact.clone();
    let text = text.to_string();
    let written = tokio::task::spawn_blocking(move || -> Result<(), RenderError> {
        for format in DocumentFormat::ALL {
            write_document(format, &text, target.path(format))?;
        }
        Ok(())
    })
    .await
    .context("Document rendering task failed")?;

    if let Err(e) = written {
        discard(artifact).await;
        return Err(AppError::Internal(
            anyhow!(e).context(format!("Failed to write artifact {}", artifact.id)),
        ));
    }
    Ok(())
}

/// Best-effort removal of a partially written artifact.
async fn discard(artifact: &GeneratedArtifact) {
    for format in DocumentFormat::ALL {
        let path = artifact.path(format);
        match tokio::fs::remove_file(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove partial file {}: {e}", path.display()),
        }
    }
}

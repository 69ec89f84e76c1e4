//! Axum route handlers for resume synthesis.

use anyhow::anyhow;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::summary::generate_summary_with_template;
use crate::models::resume::ResumeRecord;
use crate::render::render_to_bytes;
use crate::state::AppState;
use crate::synthesis::intake::{build_record, validate_submission, ResumeSubmission};

pub const DOCUMENT_FILENAME: &str = "resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub template_index: usize,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub resume: ResumeRecord,
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/summary
///
/// Returns the templated professional summary for the submitted resume.
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(submission): Json<ResumeSubmission>,
) -> Result<Json<SummaryResponse>, AppError> {
    let record = prepare_record(&state, submission).await?;
    let generated = generate_summary_with_template(&record, state.template_selector.as_ref());

    info!("Generated summary with template {}", generated.template_index);

    Ok(Json(SummaryResponse {
        summary: generated.summary,
        template_index: generated.template_index,
    }))
}

/// POST /api/v1/resumes/document
///
/// Renders the submitted resume and returns it as a PDF download.
pub async fn handle_document(
    State(state): State<AppState>,
    Json(submission): Json<ResumeSubmission>,
) -> Result<impl IntoResponse, AppError> {
    let record = prepare_record(&state, submission).await?;
    let page_config = state.page_config.clone();

    // Layout + serialization are CPU-bound; keep them off the async workers.
    let pdf = tokio::task::spawn_blocking(move || render_to_bytes(&record, &page_config))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Render task failed: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOCUMENT_FILENAME}\""),
            ),
        ],
        Bytes::from(pdf),
    ))
}

/// POST /api/v1/resumes/preview
///
/// Echoes the normalized record (resolved profession and descriptions)
/// together with a summary, so the client can review before downloading.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(submission): Json<ResumeSubmission>,
) -> Result<Json<PreviewResponse>, AppError> {
    let record = prepare_record(&state, submission).await?;
    let generated = generate_summary_with_template(&record, state.template_selector.as_ref());

    Ok(Json(PreviewResponse {
        resume: record,
        summary: generated.summary,
    }))
}

/// Validates a submission and builds its record.
async fn prepare_record(
    state: &AppState,
    submission: ResumeSubmission,
) -> Result<ResumeRecord, AppError> {
    let validation = validate_submission(&submission);
    if !validation.passed {
        return Err(AppError::Validation(validation.problems.join("; ")));
    }

    Ok(build_record(
        submission,
        state.describer.as_ref(),
        state.config.description_timeout,
    )
    .await?)
}

//! Axum route handlers for the Student API.

use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::extract_skills_from_text;
use crate::models::internship::ApplicationRow;
use crate::models::student::{NewStudent, StudentUpdate};
use crate::state::AppState;
use crate::students::service::{
    apply_to_internship, get_applied_internships, get_student_profile, get_suggested_internships,
    ingest_resume, register_student, require_resume_text, update_student_profile,
    AppliedInternship, ResumeIngestResult, StudentProfile, SuggestedInternship,
};

/// Room for multipart boundaries and part headers on top of the PDF itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Request body limit for resume uploads. Oversized files still reach the
/// handler's own size check so they get a clear error.
pub fn resume_body_limit(max_resume_bytes: usize) -> usize {
    max_resume_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub internship_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/students
pub async fn handle_register_student(
    State(state): State<AppState>,
    Json(student): Json<NewStudent>,
) -> Result<(StatusCode, Json<StudentProfile>), AppError> {
    let profile = register_student(state.repo.as_ref(), student).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/students/:id
pub async fn handle_get_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentProfile>, AppError> {
    Ok(Json(get_student_profile(state.repo.as_ref(), student_id).await?))
}

/// PATCH /api/v1/students/:id
pub async fn handle_update_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(update): Json<StudentUpdate>,
) -> Result<Json<StudentProfile>, AppError> {
    Ok(Json(
        update_student_profile(state.repo.as_ref(), student_id, update).await?,
    ))
}

/// GET /api/v1/students/:id/suggestions
///
/// All active internships, best skill match first.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<SuggestedInternship>>, AppError> {
    Ok(Json(
        get_suggested_internships(state.repo.as_ref(), student_id).await?,
    ))
}

/// POST /api/v1/students/:id/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let application =
        apply_to_internship(state.repo.as_ref(), student_id, request.internship_id).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/students/:id/applications
pub async fn handle_applied(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<AppliedInternship>>, AppError> {
    Ok(Json(
        get_applied_internships(state.repo.as_ref(), student_id).await?,
    ))
}

/// POST /api/v1/students/:id/resume
///
/// Multipart upload with a single `resume` PDF field. The PDF is stored in S3,
/// its text extracted, and the skills found in it saved on the student.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ResumeIngestResult>, AppError> {
    let mut pdf: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("resume") {
            pdf = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?,
            );
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation("Missing 'resume' field".to_string()))?;
    if pdf.is_empty() {
        return Err(AppError::Validation("Resume file is empty".to_string()));
    }
    if pdf.len() > state.config.max_resume_bytes {
        return Err(AppError::Validation(format!(
            "Resume exceeds {} bytes",
            state.config.max_resume_bytes
        )));
    }

    // Fail before touching S3 if the student does not exist.
    state
        .repo
        .get_student(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;

    // Nothing reaches S3 unless the resume is readable.
    let text = extract_pdf_text(pdf.clone()).await?;
    require_resume_text(&text)?;

    let s3_key = format!("resumes/{}/{}.pdf", student_id, Uuid::new_v4());
    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(pdf))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume upload failed: {e}")))?;

    info!(
        "Uploaded resume to s3://{}/{}",
        state.config.s3_bucket, s3_key
    );

    match ingest_resume(state.repo.as_ref(), student_id, text, Some(s3_key.clone())).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            remove_orphaned_resume(&state, &s3_key).await;
            Err(e)
        }
    }
}

/// Best-effort removal of an uploaded resume whose ingestion failed.
async fn remove_orphaned_resume(state: &AppState, s3_key: &str) {
    if let Err(e) = state
        .s3
        .delete_object()
        .bucket(&state.config.s3_bucket)
        .key(s3_key)
        .send()
        .await
    {
        warn!("Could not remove orphaned resume s3://{}/{s3_key}: {e}", state.config.s3_bucket);
    }
}

/// POST /api/v1/skills/extract
///
/// Skills found in arbitrary text, without persisting anything.
pub async fn handle_extract_skills(
    Json(request): Json<ExtractSkillsRequest>,
) -> Json<ExtractSkillsResponse> {
    Json(ExtractSkillsResponse {
        skills: extract_skills_from_text(&request.text),
    })
}

/// PDF parsing is CPU-bound; keep it off the async workers.
async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))
}

//! Axum route handlers for the Company API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::companies::analytics::InternshipAnalytics;
use crate::companies::service::{
    delete_internship, get_company_analytics, get_company_profile, get_ranked_applicants,
    list_company_internships, post_internship, register_company, update_applicant_status,
    update_company_profile, update_internship, ApplicantView, PostInternshipRequest,
};
use crate::errors::AppError;
use crate::matching::RankedApplicant;
use crate::models::company::{CompanyRow, CompanyUpdate, NewCompany};
use crate::models::internship::{ApplicationRow, ApplicationStatus, InternshipRow, InternshipUpdate};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/companies
pub async fn handle_register_company(
    State(state): State<AppState>,
    Json(company): Json<NewCompany>,
) -> Result<(StatusCode, Json<CompanyRow>), AppError> {
    let company = register_company(state.repo.as_ref(), company).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/v1/companies/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<CompanyRow>, AppError> {
    Ok(Json(get_company_profile(state.repo.as_ref(), company_id).await?))
}

/// PATCH /api/v1/companies/:id
pub async fn handle_update_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(update): Json<CompanyUpdate>,
) -> Result<Json<CompanyRow>, AppError> {
    Ok(Json(
        update_company_profile(state.repo.as_ref(), company_id, update).await?,
    ))
}

/// POST /api/v1/companies/:id/internships
pub async fn handle_post_internship(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(request): Json<PostInternshipRequest>,
) -> Result<(StatusCode, Json<InternshipRow>), AppError> {
    let internship = post_internship(state.repo.as_ref(), company_id, request).await?;
    Ok((StatusCode::CREATED, Json(internship)))
}

/// GET /api/v1/companies/:id/internships
pub async fn handle_list_internships(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<InternshipRow>>, AppError> {
    Ok(Json(
        list_company_internships(state.repo.as_ref(), company_id).await?,
    ))
}

/// GET /api/v1/companies/:id/analytics
pub async fn handle_analytics(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<InternshipAnalytics>, AppError> {
    Ok(Json(
        get_company_analytics(state.repo.as_ref(), company_id).await?,
    ))
}

/// PATCH /api/v1/internships/:id
pub async fn handle_update_internship(
    State(state): State<AppState>,
    Path(internship_id): Path<Uuid>,
    Json(update): Json<InternshipUpdate>,
) -> Result<Json<InternshipRow>, AppError> {
    Ok(Json(
        update_internship(state.repo.as_ref(), internship_id, update).await?,
    ))
}

/// DELETE /api/v1/internships/:id
pub async fn handle_delete_internship(
    State(state): State<AppState>,
    Path(internship_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_internship(state.repo.as_ref(), internship_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/internships/:id/applicants
///
/// Applicants ranked by final score, each with a position badge.
pub async fn handle_applicants(
    State(state): State<AppState>,
    Path(internship_id): Path<Uuid>,
) -> Result<Json<Vec<RankedApplicant<ApplicantView>>>, AppError> {
    Ok(Json(
        get_ranked_applicants(state.repo.as_ref(), internship_id).await?,
    ))
}

/// PATCH /api/v1/internships/:id/applicants/:student_id
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path((internship_id, student_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let status: ApplicationStatus = request.status.parse().map_err(AppError::Validation)?;
    Ok(Json(
        update_applicant_status(
            state.repo.as_ref(),
            state.notifier.as_ref(),
            internship_id,
            student_id,
            status,
        )
        .await?,
    ))
}

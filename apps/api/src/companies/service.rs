//! Company-facing flows: internship postings, the ranked applicant queue,
//! applicant decisions, and analytics.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::companies::analytics::{compute_analytics, ApplicantSample, InternshipAnalytics};
use crate::errors::AppError;
use crate::matching::{dedup_skill_names, evaluate, rank, CandidateProfile, CandidateScore, RankedApplicant, Scored};
use crate::models::company::{CompanyRow, CompanyUpdate, NewCompany};
use crate::models::normalize_email;
use crate::models::internship::{
    ApplicationRow, ApplicationStatus, InternshipRow, InternshipUpdate, NewInternship,
};
use crate::models::student::StudentRow;
use crate::notifications::{Notifier, StatusNotification};
use crate::repository::PortalRepository;

#[derive(Debug, Deserialize)]
pub struct PostInternshipRequest {
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub stipend: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
}

/// One row of a company's review queue.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantView {
    pub student_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,
    pub interests: Option<String>,
    pub preferred_role: Option<String>,
    pub skills: Vec<String>,
    pub extracted_skills: Vec<String>,
    pub resume_s3_key: Option<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(flatten)]
    pub score: CandidateScore,
    pub application_status: String,
    pub applied_at: DateTime<Utc>,
}

impl Scored for ApplicantView {
    fn final_score(&self) -> f64 {
        self.score.final_score
    }
}

async fn require_company(repo: &dyn PortalRepository, company_id: Uuid) -> Result<CompanyRow, AppError> {
    repo.get_company(company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))
}

pub async fn register_company(
    repo: &dyn PortalRepository,
    mut company: NewCompany,
) -> Result<CompanyRow, AppError> {
    company.company_name = company.company_name.trim().to_string();
    if company.company_name.is_empty() {
        return Err(AppError::Validation("company_name cannot be empty".to_string()));
    }
    company.email = normalize_email(&company.email)
        .ok_or_else(|| AppError::Validation("email is not a valid address".to_string()))?;

    let row = repo.insert_company(&company).await?.ok_or_else(|| {
        AppError::Conflict(format!("Email {} is already registered", company.email))
    })?;

    info!("Registered company {} ({})", row.id, row.company_name);
    Ok(row)
}

pub async fn get_company_profile(
    repo: &dyn PortalRepository,
    company_id: Uuid,
) -> Result<CompanyRow, AppError> {
    require_company(repo, company_id).await
}

/// Renaming a company also renames it on its existing postings, so students
/// and status messages see the current name.
pub async fn update_company_profile(
    repo: &dyn PortalRepository,
    company_id: Uuid,
    mut update: CompanyUpdate,
) -> Result<CompanyRow, AppError> {
    if let Some(name) = update.company_name.take() {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("company_name cannot be empty".to_string()));
        }
        update.company_name = Some(name);
    }
    let company = repo
        .update_company(company_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))?;
    info!("Updated profile for company {company_id}");
    Ok(company)
}

async fn require_internship(
    repo: &dyn PortalRepository,
    internship_id: Uuid,
) -> Result<InternshipRow, AppError> {
    repo.get_internship(internship_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Internship {internship_id} not found")))
}

pub async fn post_internship(
    repo: &dyn PortalRepository,
    company_id: Uuid,
    request: PostInternshipRequest,
) -> Result<InternshipRow, AppError> {
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }
    let company = require_company(repo, company_id).await?;

    let new = NewInternship {
        company_id,
        company_name: company.company_name,
        role: request.role.trim().to_string(),
        description: request.description,
        required_skills: dedup_skill_names(request.required_skills),
        stipend: non_blank_or(request.stipend, "Unpaid"),
        duration: non_blank_or(request.duration, "Not specified"),
        location: non_blank_or(request.location, "Remote"),
    };
    let internship = repo.insert_internship(&new).await?;

    info!(
        "Company {company_id} posted internship {} ({} required skill(s))",
        internship.id,
        internship.required_skills.len()
    );
    Ok(internship)
}

pub async fn list_company_internships(
    repo: &dyn PortalRepository,
    company_id: Uuid,
) -> Result<Vec<InternshipRow>, AppError> {
    require_company(repo, company_id).await?;
    Ok(repo.list_company_internships(company_id).await?)
}

pub async fn update_internship(
    repo: &dyn PortalRepository,
    internship_id: Uuid,
    mut update: InternshipUpdate,
) -> Result<InternshipRow, AppError> {
    if update.role.as_deref().is_some_and(|r| r.trim().is_empty()) {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }
    if let Some(skills) = update.required_skills.take() {
        update.required_skills = Some(dedup_skill_names(skills));
    }
    let internship = repo
        .update_internship(internship_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Internship {internship_id} not found")))?;
    info!("Updated internship {internship_id}");
    Ok(internship)
}

pub async fn delete_internship(
    repo: &dyn PortalRepository,
    internship_id: Uuid,
) -> Result<(), AppError> {
    if !repo.delete_internship(internship_id).await? {
        return Err(AppError::NotFound(format!(
            "Internship {internship_id} not found"
        )));
    }
    info!("Deleted internship {internship_id}");
    Ok(())
}

/// The review queue: every applicant scored against the internship's current
/// requirements, sorted by final score and badged by position.
pub async fn get_ranked_applicants(
    repo: &dyn PortalRepository,
    internship_id: Uuid,
) -> Result<Vec<RankedApplicant<ApplicantView>>, AppError> {
    let internship = require_internship(repo, internship_id).await?;
    let applications = repo.list_internship_applications(internship_id).await?;
    let students = load_students(repo, &applications).await?;

    let mut views = Vec::with_capacity(applications.len());
    for application in applications {
        let student = students.get(&application.student_id);
        views.push(applicant_view(
            application,
            student,
            &internship.required_skills,
        )?);
    }

    Ok(rank(&views))
}

fn applicant_view(
    application: ApplicationRow,
    student: Option<&StudentRow>,
    required_skills: &[String],
) -> Result<ApplicantView, AppError> {
    let profile = student
        .map(StudentRow::candidate_profile)
        .unwrap_or_default();
    let evaluation = evaluate(&profile, required_skills)?;

    Ok(ApplicantView {
        student_id: application.student_id,
        name: student
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        email: student.map(|s| s.email.clone()),
        phone: student.and_then(|s| s.phone.clone()),
        college: student.and_then(|s| s.college.clone()),
        degree: student.and_then(|s| s.degree.clone()),
        year: student.and_then(|s| s.year.clone()),
        interests: student.and_then(|s| s.interests.clone()),
        preferred_role: student.and_then(|s| s.preferred_role.clone()),
        skills: profile.declared_skills,
        extracted_skills: profile.extracted_skills,
        resume_s3_key: student.and_then(|s| s.resume_s3_key.clone()),
        matched_skills: evaluation.match_result.matched_skills,
        missing_skills: evaluation.match_result.missing_skills,
        score: evaluation.score,
        application_status: application.status,
        applied_at: application.applied_at,
    })
}

async fn load_students(
    repo: &dyn PortalRepository,
    applications: &[ApplicationRow],
) -> Result<HashMap<Uuid, StudentRow>, AppError> {
    let ids: Vec<Uuid> = applications.iter().map(|a| a.student_id).collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let students: HashMap<Uuid, StudentRow> = repo
        .get_students(&ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();
    for id in ids.iter().filter(|id| !students.contains_key(id)) {
        warn!("Applicant {id} has no student record; scoring as empty profile");
    }
    Ok(students)
}

/// Accepts or rejects an applicant and notifies them. A failed notification is
/// logged; the decision stands.
pub async fn update_applicant_status(
    repo: &dyn PortalRepository,
    notifier: &dyn Notifier,
    internship_id: Uuid,
    student_id: Uuid,
    status: ApplicationStatus,
) -> Result<ApplicationRow, AppError> {
    if status == ApplicationStatus::Pending {
        return Err(AppError::Validation(
            "status must be 'accepted' or 'rejected'".to_string(),
        ));
    }
    let internship = require_internship(repo, internship_id).await?;

    let application = repo
        .update_application_status(internship_id, student_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Applicant not found".to_string()))?;

    info!("Applicant {student_id} {status} for internship {internship_id}");

    let phone = repo.get_student(student_id).await?.and_then(|s| s.phone);
    let notification = StatusNotification::new(
        student_id,
        internship_id,
        status,
        phone,
        &internship.company_name,
        &internship.role,
    );
    if let Err(e) = notifier.notify(&notification).await {
        warn!("Status notification for student {student_id} not delivered: {e}");
    }

    Ok(application)
}

pub async fn get_company_analytics(
    repo: &dyn PortalRepository,
    company_id: Uuid,
) -> Result<InternshipAnalytics, AppError> {
    require_company(repo, company_id).await?;
    let internships = repo.list_company_internships(company_id).await?;

    let mut rows: Vec<(ApplicationRow, Vec<String>)> = Vec::new();
    for internship in internships {
        for application in repo.list_internship_applications(internship.id).await? {
            rows.push((application, internship.required_skills.clone()));
        }
    }

    let applications: Vec<ApplicationRow> = rows.iter().map(|(a, _)| a.clone()).collect();
    let students = load_students(repo, &applications).await?;
    let profiles: Vec<CandidateProfile> = rows
        .iter()
        .map(|(a, _)| {
            students
                .get(&a.student_id)
                .map(StudentRow::candidate_profile)
                .unwrap_or_default()
        })
        .collect();

    let samples = rows
        .iter()
        .zip(&profiles)
        .map(|((application, required_skills), profile)| ApplicantSample {
            profile,
            required_skills,
            applied_at: application.applied_at,
        });

    Ok(compute_analytics(samples)?)
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

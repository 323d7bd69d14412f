//! Student-facing flows: profile, suggestion list, applications, resume ingestion.
//! Every match shown here is recomputed from the current store contents.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::{calculate_match, dedup_skill_names, extract_skills_from_text, MatchResult};
use crate::models::internship::{ApplicationRow, InternshipRow};
use crate::models::normalize_email;
use crate::models::student::{NewStudent, ResumeUpdate, StudentRow, StudentUpdate};
use crate::repository::PortalRepository;
use crate::students::completion::profile_completion;

#[derive(Debug, Serialize)]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student: StudentRow,
    /// Declared + extracted skills, lower-cased and deduplicated.
    pub all_skills: Vec<String>,
    pub profile_completion: u8,
}

#[derive(Debug, Serialize)]
pub struct SuggestedInternship {
    #[serde(flatten)]
    pub internship: InternshipRow,
    #[serde(flatten)]
    pub match_result: MatchResult,
    pub company_industry: String,
}

#[derive(Debug, Serialize)]
pub struct AppliedInternship {
    #[serde(flatten)]
    pub internship: InternshipRow,
    #[serde(flatten)]
    pub match_result: MatchResult,
    pub application_status: String,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ResumeIngestResult {
    pub student_id: Uuid,
    pub extracted_skills: Vec<String>,
    pub word_count: usize,
    pub resume_s3_key: Option<String>,
}

async fn require_student(repo: &dyn PortalRepository, student_id: Uuid) -> Result<StudentRow, AppError> {
    repo.get_student(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))
}

pub async fn register_student(
    repo: &dyn PortalRepository,
    mut student: NewStudent,
) -> Result<StudentProfile, AppError> {
    student.name = student.name.trim().to_string();
    if student.name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    student.email = normalize_email(&student.email)
        .ok_or_else(|| AppError::Validation("email is not a valid address".to_string()))?;
    student.skills = dedup_skill_names(student.skills);

    let row = repo.insert_student(&student).await?.ok_or_else(|| {
        AppError::Conflict(format!("Email {} is already registered", student.email))
    })?;

    info!("Registered student {}", row.id);
    get_student_profile(repo, row.id).await
}

pub async fn get_student_profile(
    repo: &dyn PortalRepository,
    student_id: Uuid,
) -> Result<StudentProfile, AppError> {
    let student = require_student(repo, student_id).await?;
    let all_skills = student
        .candidate_profile()
        .skill_set()
        .iter()
        .map(String::from)
        .collect();
    let profile_completion = profile_completion(&student);
    Ok(StudentProfile {
        student,
        all_skills,
        profile_completion,
    })
}

pub async fn update_student_profile(
    repo: &dyn PortalRepository,
    student_id: Uuid,
    mut update: StudentUpdate,
) -> Result<StudentProfile, AppError> {
    if let Some(score) = update.resume_score {
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(AppError::Validation(
                "resume_score must be between 0 and 100".to_string(),
            ));
        }
    }
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
    }
    if let Some(experience) = &update.experience {
        if !experience.is_array() {
            return Err(AppError::Validation("experience must be an array".to_string()));
        }
    }
    if let Some(skills) = update.skills.take() {
        update.skills = Some(dedup_skill_names(skills));
    }

    repo.update_student(student_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;

    info!("Updated profile for student {student_id}");
    get_student_profile(repo, student_id).await
}

/// Every active internship with the student's match, best match first.
/// Equal percentages keep posting order.
pub async fn get_suggested_internships(
    repo: &dyn PortalRepository,
    student_id: Uuid,
) -> Result<Vec<SuggestedInternship>, AppError> {
    let student = require_student(repo, student_id).await?;
    let skills = student.candidate_profile().skill_set();
    let internships = repo.list_active_internships().await?;

    let mut industries: HashMap<Uuid, String> = HashMap::new();
    let mut suggestions = Vec::with_capacity(internships.len());
    for internship in internships {
        if !industries.contains_key(&internship.company_id) {
            let industry = repo
                .get_company(internship.company_id)
                .await?
                .and_then(|c| c.industry)
                .unwrap_or_default();
            industries.insert(internship.company_id, industry);
        }
        let company_industry = industries
            .get(&internship.company_id)
            .cloned()
            .unwrap_or_default();
        let match_result = calculate_match(&skills, &internship.required_skills);
        suggestions.push(SuggestedInternship {
            internship,
            match_result,
            company_industry,
        });
    }

    suggestions.sort_by_key(|s| Reverse(s.match_result.match_percentage));
    Ok(suggestions)
}

pub async fn apply_to_internship(
    repo: &dyn PortalRepository,
    student_id: Uuid,
    internship_id: Uuid,
) -> Result<ApplicationRow, AppError> {
    let student = require_student(repo, student_id).await?;
    let internship = repo
        .get_internship(internship_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Internship {internship_id} not found")))?;

    if !internship.is_active {
        return Err(AppError::Validation(format!(
            "Internship {internship_id} is no longer accepting applications"
        )));
    }

    let application = repo
        .insert_application(internship_id, student_id)
        .await?
        .ok_or_else(|| AppError::Conflict("Already applied to this internship".to_string()))?;

    let match_result = calculate_match(
        &student.candidate_profile().skill_set(),
        &internship.required_skills,
    );
    info!(
        "Student {student_id} applied to internship {internship_id} ({}% match)",
        match_result.match_percentage
    );
    Ok(application)
}

/// Internships the student applied to, with the current status and a fresh match.
/// Applications whose internship has disappeared are skipped.
pub async fn get_applied_internships(
    repo: &dyn PortalRepository,
    student_id: Uuid,
) -> Result<Vec<AppliedInternship>, AppError> {
    let student = require_student(repo, student_id).await?;
    let skills = student.candidate_profile().skill_set();

    let mut applied = Vec::new();
    for application in repo.list_student_applications(student_id).await? {
        let Some(internship) = repo.get_internship(application.internship_id).await? else {
            warn!(
                "Application {} points at missing internship {}",
                application.id, application.internship_id
            );
            continue;
        };
        let match_result = calculate_match(&skills, &internship.required_skills);
        applied.push(AppliedInternship {
            internship,
            match_result,
            application_status: application.status,
            applied_at: application.applied_at,
        });
    }
    Ok(applied)
}

/// Stores resume text and the skills found in it. `resume_s3_key` is where the
/// original file was uploaded, if it was.
pub async fn ingest_resume(
    repo: &dyn PortalRepository,
    student_id: Uuid,
    resume_text: String,
    resume_s3_key: Option<String>,
) -> Result<ResumeIngestResult, AppError> {
    require_resume_text(&resume_text)?;

    let extracted_skills = extract_skills_from_text(&resume_text);
    let word_count = resume_text.split_whitespace().count();

    let update = ResumeUpdate {
        extracted_skills: extracted_skills.clone(),
        resume_text,
        resume_s3_key: resume_s3_key.clone(),
    };
    repo.save_resume(student_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;

    info!(
        "Ingested resume for student {student_id}: {} skill(s) in {word_count} word(s)",
        extracted_skills.len()
    );

    Ok(ResumeIngestResult {
        student_id,
        extracted_skills,
        word_count,
        resume_s3_key,
    })
}

/// Rejects resumes with no readable text, e.g. scanned images.
pub fn require_resume_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text could be read from the resume".to_string(),
        ));
    }
    Ok(())
}

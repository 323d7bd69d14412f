use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::CandidateProfile;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,
    pub interests: Option<String>,
    pub preferred_role: Option<String>,
    pub skills: Vec<String>,
    pub extracted_skills: Vec<String>,
    pub resume_text: Option<String>,
    pub resume_s3_key: Option<String>,
    pub resume_score: Option<f64>,
    /// JSON array of experience entries; only its length is interpreted here.
    pub experience: Value,
    pub created_at: DateTime<Utc>,
}

impl StudentRow {
    /// The scoring core's view of this student.
    pub fn candidate_profile(&self) -> CandidateProfile {
        CandidateProfile {
            declared_skills: self.skills.clone(),
            extracted_skills: self.extracted_skills.clone(),
            resume_score: self.resume_score,
            resume_text: self.resume_text.clone(),
        }
    }
}

/// Registration payload for a student. Everything but name and email may be
/// filled in later through a profile update.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,
    pub interests: Option<String>,
    pub preferred_role: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Partial update of a student profile; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,
    pub interests: Option<String>,
    pub preferred_role: Option<String>,
    pub skills: Option<Vec<String>>,
    /// Externally assessed resume quality, 0–100.
    pub resume_score: Option<f64>,
    pub experience: Option<Value>,
}

/// Output of resume ingestion persisted on the student.
#[derive(Debug, Clone)]
pub struct ResumeUpdate {
    pub extracted_skills: Vec<String>,
    pub resume_text: String,
    pub resume_s3_key: Option<String>,
}

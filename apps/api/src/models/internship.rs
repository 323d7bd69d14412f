use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InternshipRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub role: String,
    pub description: String,
    /// Case preserved as authored; compared case-insensitively.
    pub required_skills: Vec<String>,
    pub stipend: String,
    pub duration: String,
    pub location: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new internship posting, defaults already applied.
#[derive(Debug, Clone)]
pub struct NewInternship {
    pub company_id: Uuid,
    pub company_name: String,
    pub role: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub stipend: String,
    pub duration: String,
    pub location: String,
}

/// Partial update of an internship; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InternshipUpdate {
    pub role: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub stipend: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub internship_id: Uuid,
    pub student_id: Uuid,
    /// One of `ApplicationStatus`, stored as text.
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("unknown application status '{other}'")),
        }
    }
}

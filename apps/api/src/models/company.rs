use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub company_name: String,
    pub email: String,
    pub hr_name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registration payload for a company.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCompany {
    pub company_name: String,
    pub email: String,
    pub hr_name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// Partial update of a company profile; `None` leaves a field unchanged.
/// The login email is not editable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyUpdate {
    pub company_name: Option<String>,
    pub hr_name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

//! In-memory collaborators for service and router tests.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::company::{CompanyRow, CompanyUpdate, NewCompany};
use crate::models::internship::{
    ApplicationRow, ApplicationStatus, InternshipRow, InternshipUpdate, NewInternship,
};
use crate::models::student::{NewStudent, ResumeUpdate, StudentRow, StudentUpdate};
use crate::notifications::{Notifier, StatusNotification};
use crate::repository::PortalRepository;
use crate::state::AppState;

#[derive(Default)]
struct Tables {
    students: Vec<StudentRow>,
    companies: Vec<CompanyRow>,
    internships: Vec<InternshipRow>,
    applications: Vec<ApplicationRow>,
    /// Logical clock so rows get strictly increasing timestamps.
    tick: i64,
}

impl Tables {
    fn now(&mut self) -> DateTime<Utc> {
        self.tick += 1;
        base_time() + Duration::minutes(self.tick)
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
}

#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_student(&self, name: &str, skills: &[&str]) -> Uuid {
        let mut t = self.tables.lock().unwrap();
        let created_at = t.now();
        let id = Uuid::new_v4();
        t.students.push(StudentRow {
            id,
            name: name.to_string(),
            email: format!("{}@example.edu", name.to_lowercase()),
            phone: None,
            college: None,
            degree: None,
            year: None,
            interests: None,
            preferred_role: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            extracted_skills: vec![],
            resume_text: None,
            resume_s3_key: None,
            resume_score: None,
            experience: json!([]),
            created_at,
        });
        id
    }

    pub fn with_student<F: FnOnce(&mut StudentRow)>(&self, id: Uuid, f: F) {
        let mut t = self.tables.lock().unwrap();
        if let Some(s) = t.students.iter_mut().find(|s| s.id == id) {
            f(s);
        }
    }

    pub fn add_company(&self, name: &str) -> Uuid {
        let mut t = self.tables.lock().unwrap();
        let created_at = t.now();
        let id = Uuid::new_v4();
        t.companies.push(CompanyRow {
            id,
            company_name: name.to_string(),
            email: format!("hr@{}.com", name.to_lowercase()),
            hr_name: None,
            industry: Some("Software".to_string()),
            website: None,
            description: None,
            created_at,
        });
        id
    }

    pub fn add_internship(&self, company_id: Uuid, role: &str, required: &[&str]) -> Uuid {
        let company_name = {
            let t = self.tables.lock().unwrap();
            t.companies
                .iter()
                .find(|c| c.id == company_id)
                .map(|c| c.company_name.clone())
                .unwrap_or_else(|| "Unknown".to_string())
        };
        let mut t = self.tables.lock().unwrap();
        let created_at = t.now();
        let id = Uuid::new_v4();
        t.internships.push(InternshipRow {
            id,
            company_id,
            company_name,
            role: role.to_string(),
            description: String::new(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            stipend: "Unpaid".to_string(),
            duration: "Not specified".to_string(),
            location: "Remote".to_string(),
            is_active: true,
            created_at,
        });
        id
    }

    pub fn application_count(&self) -> usize {
        self.tables.lock().unwrap().applications.len()
    }
}

#[async_trait]
impl PortalRepository for InMemoryRepository {
    async fn insert_student(&self, student: &NewStudent) -> Result<Option<StudentRow>> {
        let mut t = self.tables.lock().unwrap();
        if t.students.iter().any(|s| s.email == student.email) {
            return Ok(None);
        }
        let created_at = t.now();
        let row = StudentRow {
            id: Uuid::new_v4(),
            name: student.name.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            college: student.college.clone(),
            degree: student.degree.clone(),
            year: student.year.clone(),
            interests: student.interests.clone(),
            preferred_role: student.preferred_role.clone(),
            skills: student.skills.clone(),
            extracted_skills: vec![],
            resume_text: None,
            resume_s3_key: None,
            resume_score: None,
            experience: json!([]),
            created_at,
        };
        t.students.push(row.clone());
        Ok(Some(row))
    }

    async fn get_student(&self, student_id: Uuid) -> Result<Option<StudentRow>> {
        let t = self.tables.lock().unwrap();
        Ok(t.students.iter().find(|s| s.id == student_id).cloned())
    }

    async fn get_students(&self, student_ids: &[Uuid]) -> Result<Vec<StudentRow>> {
        let t = self.tables.lock().unwrap();
        Ok(t.students
            .iter()
            .filter(|s| student_ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn update_student(
        &self,
        student_id: Uuid,
        update: &StudentUpdate,
    ) -> Result<Option<StudentRow>> {
        let mut t = self.tables.lock().unwrap();
        let Some(s) = t.students.iter_mut().find(|s| s.id == student_id) else {
            return Ok(None);
        };
        if let Some(v) = &update.name {
            s.name = v.clone();
        }
        if let Some(v) = &update.phone {
            s.phone = Some(v.clone());
        }
        if let Some(v) = &update.college {
            s.college = Some(v.clone());
        }
        if let Some(v) = &update.degree {
            s.degree = Some(v.clone());
        }
        if let Some(v) = &update.year {
            s.year = Some(v.clone());
        }
        if let Some(v) = &update.interests {
            s.interests = Some(v.clone());
        }
        if let Some(v) = &update.preferred_role {
            s.preferred_role = Some(v.clone());
        }
        if let Some(v) = &update.skills {
            s.skills = v.clone();
        }
        if let Some(v) = update.resume_score {
            s.resume_score = Some(v);
        }
        if let Some(v) = &update.experience {
            s.experience = v.clone();
        }
        Ok(Some(s.clone()))
    }

    async fn save_resume(
        &self,
        student_id: Uuid,
        resume: &ResumeUpdate,
    ) -> Result<Option<StudentRow>> {
        let mut t = self.tables.lock().unwrap();
        let Some(s) = t.students.iter_mut().find(|s| s.id == student_id) else {
            return Ok(None);
        };
        s.extracted_skills = resume.extracted_skills.clone();
        s.resume_text = Some(resume.resume_text.clone());
        if let Some(key) = &resume.resume_s3_key {
            s.resume_s3_key = Some(key.clone());
        }
        Ok(Some(s.clone()))
    }

    async fn get_company(&self, company_id: Uuid) -> Result<Option<CompanyRow>> {
        let t = self.tables.lock().unwrap();
        Ok(t.companies.iter().find(|c| c.id == company_id).cloned())
    }

    async fn insert_company(&self, company: &NewCompany) -> Result<Option<CompanyRow>> {
        let mut t = self.tables.lock().unwrap();
        if t.companies.iter().any(|c| c.email == company.email) {
            return Ok(None);
        }
        let created_at = t.now();
        let row = CompanyRow {
            id: Uuid::new_v4(),
            company_name: company.company_name.clone(),
            email: company.email.clone(),
            hr_name: company.hr_name.clone(),
            industry: company.industry.clone(),
            website: company.website.clone(),
            description: company.description.clone(),
            created_at,
        };
        t.companies.push(row.clone());
        Ok(Some(row))
    }

    async fn update_company(
        &self,
        company_id: Uuid,
        update: &CompanyUpdate,
    ) -> Result<Option<CompanyRow>> {
        let mut t = self.tables.lock().unwrap();
        let Some(c) = t.companies.iter_mut().find(|c| c.id == company_id) else {
            return Ok(None);
        };
        if let Some(v) = &update.company_name {
            c.company_name = v.clone();
        }
        if let Some(v) = &update.hr_name {
            c.hr_name = Some(v.clone());
        }
        if let Some(v) = &update.industry {
            c.industry = Some(v.clone());
        }
        if let Some(v) = &update.website {
            c.website = Some(v.clone());
        }
        if let Some(v) = &update.description {
            c.description = Some(v.clone());
        }
        let row = c.clone();
        if update.company_name.is_some() {
            for i in t.internships.iter_mut().filter(|i| i.company_id == company_id) {
                i.company_name = row.company_name.clone();
            }
        }
        Ok(Some(row))
    }

    async fn get_internship(&self, internship_id: Uuid) -> Result<Option<InternshipRow>> {
        let t = self.tables.lock().unwrap();
        Ok(t.internships.iter().find(|i| i.id == internship_id).cloned())
    }

    async fn list_active_internships(&self) -> Result<Vec<InternshipRow>> {
        let t = self.tables.lock().unwrap();
        Ok(t.internships.iter().filter(|i| i.is_active).cloned().collect())
    }

    async fn list_company_internships(&self, company_id: Uuid) -> Result<Vec<InternshipRow>> {
        let t = self.tables.lock().unwrap();
        Ok(t.internships
            .iter()
            .filter(|i| i.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn insert_internship(&self, internship: &NewInternship) -> Result<InternshipRow> {
        let mut t = self.tables.lock().unwrap();
        let created_at = t.now();
        let row = InternshipRow {
            id: Uuid::new_v4(),
            company_id: internship.company_id,
            company_name: internship.company_name.clone(),
            role: internship.role.clone(),
            description: internship.description.clone(),
            required_skills: internship.required_skills.clone(),
            stipend: internship.stipend.clone(),
            duration: internship.duration.clone(),
            location: internship.location.clone(),
            is_active: true,
            created_at,
        };
        t.internships.push(row.clone());
        Ok(row)
    }

    async fn update_internship(
        &self,
        internship_id: Uuid,
        update: &InternshipUpdate,
    ) -> Result<Option<InternshipRow>> {
        let mut t = self.tables.lock().unwrap();
        let Some(i) = t.internships.iter_mut().find(|i| i.id == internship_id) else {
            return Ok(None);
        };
        if let Some(v) = &update.role {
            i.role = v.clone();
        }
        if let Some(v) = &update.description {
            i.description = v.clone();
        }
        if let Some(v) = &update.required_skills {
            i.required_skills = v.clone();
        }
        if let Some(v) = &update.stipend {
            i.stipend = v.clone();
        }
        if let Some(v) = &update.duration {
            i.duration = v.clone();
        }
        if let Some(v) = &update.location {
            i.location = v.clone();
        }
        if let Some(v) = update.is_active {
            i.is_active = v;
        }
        Ok(Some(i.clone()))
    }

    async fn delete_internship(&self, internship_id: Uuid) -> Result<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.internships.len();
        t.internships.retain(|i| i.id != internship_id);
        t.applications.retain(|a| a.internship_id != internship_id);
        Ok(t.internships.len() < before)
    }

    async fn insert_application(
        &self,
        internship_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<ApplicationRow>> {
        let mut t = self.tables.lock().unwrap();
        if t.applications
            .iter()
            .any(|a| a.internship_id == internship_id && a.student_id == student_id)
        {
            return Ok(None);
        }
        let applied_at = t.now();
        let row = ApplicationRow {
            id: Uuid::new_v4(),
            internship_id,
            student_id,
            status: ApplicationStatus::Pending.as_str().to_string(),
            applied_at,
        };
        t.applications.push(row.clone());
        Ok(Some(row))
    }

    async fn list_internship_applications(
        &self,
        internship_id: Uuid,
    ) -> Result<Vec<ApplicationRow>> {
        let t = self.tables.lock().unwrap();
        Ok(t.applications
            .iter()
            .filter(|a| a.internship_id == internship_id)
            .cloned()
            .collect())
    }

    async fn list_student_applications(&self, student_id: Uuid) -> Result<Vec<ApplicationRow>> {
        let t = self.tables.lock().unwrap();
        Ok(t.applications
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn update_application_status(
        &self,
        internship_id: Uuid,
        student_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>> {
        let mut t = self.tables.lock().unwrap();
        let Some(a) = t
            .applications
            .iter_mut()
            .find(|a| a.internship_id == internship_id && a.student_id == student_id)
        else {
            return Ok(None);
        };
        a.status = status.as_str().to_string();
        Ok(Some(a.clone()))
    }
}

/// Records every notification; optionally fails delivery.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<StatusNotification>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<StatusNotification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &StatusNotification) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Notification("redis unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/talentflow_test".to_string(),
        redis_url: "redis://127.0.0.1/".to_string(),
        s3_bucket: "resumes-test".to_string(),
        s3_endpoint: "http://127.0.0.1:9000".to_string(),
        aws_access_key_id: "test".to_string(),
        aws_secret_access_key: "test".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        max_resume_bytes: 1024,
    }
}

/// App state over in-memory collaborators. The S3 client is never reached in tests.
pub fn test_state(repo: Arc<InMemoryRepository>, notifier: Arc<RecordingNotifier>) -> AppState {
    let s3_config = aws_sdk_s3::Config::builder()
        .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
        .region(aws_sdk_s3::config::Region::new("us-east-1"))
        .build();
    AppState {
        repo,
        notifier,
        s3: aws_sdk_s3::Client::from_conf(s3_config),
        config: test_config(),
    }
}

//! Read/write access to the portal's document store.
//!
//! Services depend on `PortalRepository` only; `AppState` carries an
//! `Arc<dyn PortalRepository>` so the scoring path never sees storage types.

pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::company::{CompanyRow, CompanyUpdate, NewCompany};
use crate::models::internship::{
    ApplicationRow, ApplicationStatus, InternshipRow, InternshipUpdate, NewInternship,
};
use crate::models::student::{NewStudent, ResumeUpdate, StudentRow, StudentUpdate};

pub use postgres::PgPortalRepository;

#[async_trait]
pub trait PortalRepository: Send + Sync {
    /// `None` if the email is already registered.
    async fn insert_student(&self, student: &NewStudent) -> Result<Option<StudentRow>>;

    async fn get_student(&self, student_id: Uuid) -> Result<Option<StudentRow>>;

    async fn get_students(&self, student_ids: &[Uuid]) -> Result<Vec<StudentRow>>;

    async fn update_student(
        &self,
        student_id: Uuid,
        update: &StudentUpdate,
    ) -> Result<Option<StudentRow>>;

    async fn save_resume(
        &self,
        student_id: Uuid,
        resume: &ResumeUpdate,
    ) -> Result<Option<StudentRow>>;

    /// `None` if the email is already registered.
    async fn insert_company(&self, company: &NewCompany) -> Result<Option<CompanyRow>>;

    async fn get_company(&self, company_id: Uuid) -> Result<Option<CompanyRow>>;

    /// A new `company_name` is also copied onto the company's internships.
    async fn update_company(
        &self,
        company_id: Uuid,
        update: &CompanyUpdate,
    ) -> Result<Option<CompanyRow>>;

    async fn get_internship(&self, internship_id: Uuid) -> Result<Option<InternshipRow>>;

    /// Active internships in posting order.
    async fn list_active_internships(&self) -> Result<Vec<InternshipRow>>;

    async fn list_company_internships(&self, company_id: Uuid) -> Result<Vec<InternshipRow>>;

    async fn insert_internship(&self, internship: &NewInternship) -> Result<InternshipRow>;

    async fn update_internship(
        &self,
        internship_id: Uuid,
        update: &InternshipUpdate,
    ) -> Result<Option<InternshipRow>>;

    /// Deletes the internship and every application to it. `false` if it did not exist.
    async fn delete_internship(&self, internship_id: Uuid) -> Result<bool>;

    /// Records a pending application. `None` if the student already applied.
    async fn insert_application(
        &self,
        internship_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<ApplicationRow>>;

    /// Applications to one internship in the order they were made.
    async fn list_internship_applications(&self, internship_id: Uuid)
        -> Result<Vec<ApplicationRow>>;

    async fn list_student_applications(&self, student_id: Uuid) -> Result<Vec<ApplicationRow>>;

    async fn update_application_status(
        &self,
        internship_id: Uuid,
        student_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>>;
}

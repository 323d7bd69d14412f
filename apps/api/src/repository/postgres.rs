use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::company::{CompanyRow, CompanyUpdate, NewCompany};
use crate::models::internship::{
    ApplicationRow, ApplicationStatus, InternshipRow, InternshipUpdate, NewInternship,
};
use crate::models::student::{NewStudent, ResumeUpdate, StudentRow, StudentUpdate};
use crate::repository::PortalRepository;

/// `PortalRepository` backed by PostgreSQL.
#[derive(Clone)]
pub struct PgPortalRepository {
    pool: PgPool,
}

impl PgPortalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortalRepository for PgPortalRepository {
    async fn insert_student(&self, student: &NewStudent) -> Result<Option<StudentRow>> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            INSERT INTO students
                (id, name, email, phone, college, degree, year, interests, preferred_role, skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(&student.college)
        .bind(&student.degree)
        .bind(&student.year)
        .bind(&student.interests)
        .bind(&student.preferred_role)
        .bind(&student.skills)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = &row {
            info!("Inserted student {}", row.id);
        }
        Ok(row)
    }

    async fn get_student(&self, student_id: Uuid) -> Result<Option<StudentRow>> {
        Ok(
            sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE id = $1")
                .bind(student_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_students(&self, student_ids: &[Uuid]) -> Result<Vec<StudentRow>> {
        Ok(
            sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE id = ANY($1)")
                .bind(student_ids)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn update_student(
        &self,
        student_id: Uuid,
        update: &StudentUpdate,
    ) -> Result<Option<StudentRow>> {
        Ok(sqlx::query_as::<_, StudentRow>(
            r#"
            UPDATE students SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                college = COALESCE($4, college),
                degree = COALESCE($5, degree),
                year = COALESCE($6, year),
                interests = COALESCE($7, interests),
                preferred_role = COALESCE($8, preferred_role),
                skills = COALESCE($9, skills),
                resume_score = COALESCE($10, resume_score),
                experience = COALESCE($11, experience)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(&update.name)
        .bind(&update.phone)
        .bind(&update.college)
        .bind(&update.degree)
        .bind(&update.year)
        .bind(&update.interests)
        .bind(&update.preferred_role)
        .bind(&update.skills)
        .bind(update.resume_score)
        .bind(&update.experience)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn save_resume(
        &self,
        student_id: Uuid,
        resume: &ResumeUpdate,
    ) -> Result<Option<StudentRow>> {
        Ok(sqlx::query_as::<_, StudentRow>(
            r#"
            UPDATE students SET
                extracted_skills = $2,
                resume_text = $3,
                resume_s3_key = COALESCE($4, resume_s3_key)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(&resume.extracted_skills)
        .bind(&resume.resume_text)
        .bind(&resume.resume_s3_key)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn get_company(&self, company_id: Uuid) -> Result<Option<CompanyRow>> {
        Ok(
            sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
                .bind(company_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_company(&self, company: &NewCompany) -> Result<Option<CompanyRow>> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            INSERT INTO companies
                (id, company_name, email, hr_name, industry, website, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&company.company_name)
        .bind(&company.email)
        .bind(&company.hr_name)
        .bind(&company.industry)
        .bind(&company.website)
        .bind(&company.description)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = &row {
            info!("Inserted company {}", row.id);
        }
        Ok(row)
    }

    async fn update_company(
        &self,
        company_id: Uuid,
        update: &CompanyUpdate,
    ) -> Result<Option<CompanyRow>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            UPDATE companies SET
                company_name = COALESCE($2, company_name),
                hr_name = COALESCE($3, hr_name),
                industry = COALESCE($4, industry),
                website = COALESCE($5, website),
                description = COALESCE($6, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&update.company_name)
        .bind(&update.hr_name)
        .bind(&update.industry)
        .bind(&update.website)
        .bind(&update.description)
        .fetch_optional(&mut *tx)
        .await?;

        if let (Some(row), Some(_)) = (&row, &update.company_name) {
            sqlx::query("UPDATE internships SET company_name = $2 WHERE company_id = $1")
                .bind(company_id)
                .bind(&row.company_name)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    async fn get_internship(&self, internship_id: Uuid) -> Result<Option<InternshipRow>> {
        Ok(
            sqlx::query_as::<_, InternshipRow>("SELECT * FROM internships WHERE id = $1")
                .bind(internship_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_active_internships(&self) -> Result<Vec<InternshipRow>> {
        Ok(sqlx::query_as::<_, InternshipRow>(
            "SELECT * FROM internships WHERE is_active ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_company_internships(&self, company_id: Uuid) -> Result<Vec<InternshipRow>> {
        Ok(sqlx::query_as::<_, InternshipRow>(
            "SELECT * FROM internships WHERE company_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_internship(&self, internship: &NewInternship) -> Result<InternshipRow> {
        let row = sqlx::query_as::<_, InternshipRow>(
            r#"
            INSERT INTO internships
                (id, company_id, company_name, role, description, required_skills,
                 stipend, duration, location, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(internship.company_id)
        .bind(&internship.company_name)
        .bind(&internship.role)
        .bind(&internship.description)
        .bind(&internship.required_skills)
        .bind(&internship.stipend)
        .bind(&internship.duration)
        .bind(&internship.location)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted internship {} for company {}", row.id, row.company_id);
        Ok(row)
    }

    async fn update_internship(
        &self,
        internship_id: Uuid,
        update: &InternshipUpdate,
    ) -> Result<Option<InternshipRow>> {
        Ok(sqlx::query_as::<_, InternshipRow>(
            r#"
            UPDATE internships SET
                role = COALESCE($2, role),
                description = COALESCE($3, description),
                required_skills = COALESCE($4, required_skills),
                stipend = COALESCE($5, stipend),
                duration = COALESCE($6, duration),
                location = COALESCE($7, location),
                is_active = COALESCE($8, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(internship_id)
        .bind(&update.role)
        .bind(&update.description)
        .bind(&update.required_skills)
        .bind(&update.stipend)
        .bind(&update.duration)
        .bind(&update.location)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_internship(&self, internship_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM applications WHERE internship_id = $1")
            .bind(internship_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM internships WHERE id = $1")
            .bind(internship_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        if deleted > 0 {
            info!("Deleted internship {internship_id} and {removed} application(s)");
        }
        Ok(deleted > 0)
    }

    async fn insert_application(
        &self,
        internship_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<ApplicationRow>> {
        // (internship_id, student_id) is unique; a second apply inserts nothing.
        Ok(sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO applications (id, internship_id, student_id, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (internship_id, student_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(internship_id)
        .bind(student_id)
        .bind(ApplicationStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_internship_applications(
        &self,
        internship_id: Uuid,
    ) -> Result<Vec<ApplicationRow>> {
        Ok(sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM applications WHERE internship_id = $1 ORDER BY applied_at ASC, id ASC",
        )
        .bind(internship_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_student_applications(&self, student_id: Uuid) -> Result<Vec<ApplicationRow>> {
        Ok(sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM applications WHERE student_id = $1 ORDER BY applied_at ASC, id ASC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_application_status(
        &self,
        internship_id: Uuid,
        student_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>> {
        Ok(sqlx::query_as::<_, ApplicationRow>(
            r#"
            UPDATE applications SET status = $3
            WHERE internship_id = $1 AND student_id = $2
            RETURNING *
            "#,
        )
        .bind(internship_id)
        .bind(student_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?)
    }
}

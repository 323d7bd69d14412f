pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::companies::handlers as companies;
use crate::state::AppState;
use crate::students::handlers as students;

pub fn build_router(state: AppState) -> Router {
    let resume_limit = students::resume_body_limit(state.config.max_resume_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Student API
        .route("/api/v1/students", post(students::handle_register_student))
        .route(
            "/api/v1/students/:id",
            get(students::handle_get_student).patch(students::handle_update_student),
        )
        .route(
            "/api/v1/students/:id/resume",
            post(students::handle_upload_resume).layer(DefaultBodyLimit::max(resume_limit)),
        )
        .route(
            "/api/v1/students/:id/suggestions",
            get(students::handle_suggestions),
        )
        .route(
            "/api/v1/students/:id/applications",
            post(students::handle_apply).get(students::handle_applied),
        )
        .route("/api/v1/skills/extract", post(students::handle_extract_skills))
        // Company API
        .route("/api/v1/companies", post(companies::handle_register_company))
        .route(
            "/api/v1/companies/:id",
            get(companies::handle_get_company).patch(companies::handle_update_company),
        )
        .route(
            "/api/v1/companies/:id/internships",
            post(companies::handle_post_internship).get(companies::handle_list_internships),
        )
        .route(
            "/api/v1/companies/:id/analytics",
            get(companies::handle_analytics),
        )
        .route(
            "/api/v1/internships/:id",
            patch(companies::handle_update_internship).delete(companies::handle_delete_internship),
        )
        .route(
            "/api/v1/internships/:id/applicants",
            get(companies::handle_applicants),
        )
        .route(
            "/api/v1/internships/:id/applicants/:student_id",
            patch(companies::handle_update_status),
        )
        .with_state(state)
}

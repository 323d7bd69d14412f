// Company API: internship postings, ranked applicants, decisions, analytics.

pub mod analytics;
pub mod handlers;
pub mod service;

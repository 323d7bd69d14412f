use crate::models::student::StudentRow;

const BASIC_FIELDS_POINTS: u8 = 20;
const SKILLS_POINTS: u8 = 20;
const RESUME_POINTS: u8 = 30;
const INTERESTS_POINTS: u8 = 10;
const EXPERIENCE_POINTS: u8 = 20;

/// Profile completion percentage shown on the student dashboard.
///
/// 20 for a full set of basic fields, 20 for any skill, 30 for a resume,
/// 10 for interests, 20 for at least one experience entry. Capped at 100.
pub fn profile_completion(student: &StudentRow) -> u8 {
    let mut completion = 0u8;

    let basic_fields = [
        Some(student.name.as_str()),
        Some(student.email.as_str()),
        student.phone.as_deref(),
        student.college.as_deref(),
        student.degree.as_deref(),
        student.year.as_deref(),
        student.interests.as_deref(),
        student.preferred_role.as_deref(),
    ];
    if basic_fields.iter().all(|f| is_filled(*f)) {
        completion += BASIC_FIELDS_POINTS;
    }
    if !student.skills.is_empty() || !student.extracted_skills.is_empty() {
        completion += SKILLS_POINTS;
    }
    if student.resume_s3_key.is_some() || is_filled(student.resume_text.as_deref()) {
        completion += RESUME_POINTS;
    }
    if is_filled(student.interests.as_deref()) {
        completion += INTERESTS_POINTS;
    }
    if student
        .experience
        .as_array()
        .is_some_and(|entries| !entries.is_empty())
    {
        completion += EXPERIENCE_POINTS;
    }

    completion.min(100)
}

fn is_filled(field: Option<&str>) -> bool {
    field.is_some_and(|v| !v.trim().is_empty())
}

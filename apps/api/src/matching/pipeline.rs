use serde::{Deserialize, Serialize};

use crate::matching::calculator::{calculate_match, MatchResult};
use crate::matching::normalizer::{normalize_skills, SkillSet};
use crate::matching::scorer::{skill_density, CandidateScore};
use crate::matching::MatchError;

/// Typed view of a candidate at the core's boundary. Every field is optional
/// upstream, so every field defaults here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub declared_skills: Vec<String>,
    pub extracted_skills: Vec<String>,
    pub resume_score: Option<f64>,
    pub resume_text: Option<String>,
}

impl CandidateProfile {
    pub fn skill_set(&self) -> SkillSet {
        normalize_skills([&self.declared_skills, &self.extracted_skills])
    }
}

/// Match analysis plus composite score for one candidate against one internship.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub match_result: MatchResult,
    pub score: CandidateScore,
}

/// Normalize → match → density → composite score.
pub fn evaluate(
    profile: &CandidateProfile,
    required_skills: &[String],
) -> Result<Evaluation, MatchError> {
    let skills = profile.skill_set();
    let match_result = calculate_match(&skills, required_skills);
    let density = skill_density(skills.len(), profile.resume_text.as_deref());
    let score = CandidateScore::new(
        match_result.match_percentage,
        profile.resume_score.unwrap_or(0.0),
        density,
    )?;
    Ok(Evaluation {
        match_result,
        score,
    })
}

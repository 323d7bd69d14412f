use serde::{Deserialize, Serialize};

use crate::matching::MatchError;

/// Weight of the skill match percentage in the final score.
pub const MATCH_WEIGHT: f64 = 0.5;
/// Weight of the externally supplied resume-quality score.
pub const RESUME_WEIGHT: f64 = 0.3;
/// Weight of the skills-per-100-words density.
pub const DENSITY_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub match_percentage: f64,
    pub resume_score: f64,
    pub skill_density: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            match_percentage: MATCH_WEIGHT,
            resume_score: RESUME_WEIGHT,
            skill_density: DENSITY_WEIGHT,
        }
    }
}

/// Inputs and derived final score for one candidate.
/// `final_score` is recomputed on every ranking pass and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub match_percentage: u8,
    pub resume_score: f64,
    pub skill_density: f64,
    pub final_score: f64,
}

impl CandidateScore {
    pub fn new(match_percentage: u8, resume_score: f64, skill_density: f64) -> Result<Self, MatchError> {
        let final_score = composite_score(match_percentage, resume_score, skill_density)?;
        Ok(Self {
            match_percentage,
            resume_score,
            skill_density,
            final_score,
        })
    }
}

/// Final ranking score: round2(match×0.5 + resume×0.3 + density×0.2).
pub fn composite_score(
    match_percentage: u8,
    resume_score: f64,
    skill_density: f64,
) -> Result<f64, MatchError> {
    composite_score_with(
        &ScoringWeights::default(),
        match_percentage,
        resume_score,
        skill_density,
    )
}

/// Same as [`composite_score`] with explicit weights.
pub fn composite_score_with(
    weights: &ScoringWeights,
    match_percentage: u8,
    resume_score: f64,
    skill_density: f64,
) -> Result<f64, MatchError> {
    let resume_score = require_non_negative("resume_score", resume_score)?;
    let skill_density = require_non_negative("skill_density", skill_density)?;

    Ok(round2(
        f64::from(match_percentage) * weights.match_percentage
            + resume_score * weights.resume_score
            + skill_density * weights.skill_density,
    ))
}

/// Distinct skills per 100 words of resume text, two decimals.
/// No text, or text without words, yields 0.
pub fn skill_density(skill_count: usize, resume_text: Option<&str>) -> f64 {
    let word_count = resume_text.map_or(0, |text| text.split_whitespace().count());
    if word_count == 0 || skill_count == 0 {
        return 0.0;
    }
    round2(skill_count as f64 / word_count as f64 * 100.0)
}

fn require_non_negative(field: &'static str, value: f64) -> Result<f64, MatchError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(MatchError::InvalidInput { field, value })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

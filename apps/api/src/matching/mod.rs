// Skill matching and applicant ranking.
// Pure, synchronous functions only. No I/O or logging here.
// Callers run evaluate (normalize, match, score) per candidate, then rank.

pub mod calculator;
pub mod extractor;
pub mod normalizer;
pub mod pipeline;
pub mod ranker;
pub mod scorer;

use thiserror::Error;

pub use calculator::{calculate_match, MatchResult};
pub use extractor::extract_skills_from_text;
pub use normalizer::dedup_skill_names;
pub use pipeline::{evaluate, CandidateProfile};
pub use ranker::{rank, RankedApplicant, RankingBadge, Scored};
pub use scorer::CandidateScore;

/// Errors raised by the scoring core. Empty requirement sets are not errors.
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("invalid input: {field} must be a finite, non-negative number (got {value})")]
    InvalidInput { field: &'static str, value: f64 },
}

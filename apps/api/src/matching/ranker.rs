use serde::{Deserialize, Serialize};

use crate::matching::scorer::CandidateScore;

/// Positional label shown next to an applicant in a company's review queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingBadge {
    Top,
    Strong,
    Potential,
}

impl RankingBadge {
    /// Badge for a 0-based position in a sorted list. Position only, never score.
    pub fn for_position(position: usize) -> Self {
        match position {
            0 => RankingBadge::Top,
            1 => RankingBadge::Strong,
            _ => RankingBadge::Potential,
        }
    }
}

/// Anything that can be ranked by a composite score.
pub trait Scored {
    fn final_score(&self) -> f64;
}

impl Scored for CandidateScore {
    fn final_score(&self) -> f64 {
        self.final_score
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedApplicant<T> {
    #[serde(flatten)]
    pub candidate: T,
    pub ranking_badge: RankingBadge,
}

/// Sorts candidates by final score, highest first, and badges them by position.
///
/// The sort is stable: equal scores keep their input order, so badges are
/// deterministic. The input slice is left untouched.
pub fn rank<T: Scored + Clone>(candidates: &[T]) -> Vec<RankedApplicant<T>> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| b.final_score().total_cmp(&a.final_score()));

    sorted
        .into_iter()
        .enumerate()
        .map(|(position, candidate)| RankedApplicant {
            candidate,
            ranking_badge: RankingBadge::for_position(position),
        })
        .collect()
}

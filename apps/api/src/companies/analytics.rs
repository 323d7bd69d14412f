use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::matching::{evaluate, CandidateProfile, MatchError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub count: usize,
}

/// Aggregate applicant statistics across all of a company's internships.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InternshipAnalytics {
    pub total_applicants: usize,
    /// Mean match percentage, one decimal.
    pub avg_match: f64,
    pub highest_score: f64,
    /// Skill held by the most applicants; first seen wins ties. Empty if none.
    pub most_common_skill: String,
    /// Applications per calendar day (UTC), oldest first.
    pub growth_chart: Vec<GrowthPoint>,
}

/// One application as seen by analytics.
pub struct ApplicantSample<'a> {
    pub profile: &'a CandidateProfile,
    pub required_skills: &'a [String],
    pub applied_at: DateTime<Utc>,
}

pub fn compute_analytics<'a, I>(samples: I) -> Result<InternshipAnalytics, MatchError>
where
    I: IntoIterator<Item = ApplicantSample<'a>>,
{
    let mut total_applicants = 0usize;
    let mut match_sum = 0u64;
    let mut highest_score = 0.0_f64;
    let mut skill_order: Vec<String> = Vec::new();
    let mut skill_counts: HashMap<String, usize> = HashMap::new();
    let mut growth: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for sample in samples {
        let evaluation = evaluate(sample.profile, sample.required_skills)?;
        total_applicants += 1;
        match_sum += u64::from(evaluation.match_result.match_percentage);
        highest_score = highest_score.max(evaluation.score.final_score);

        for skill in skills_in_order(sample.profile) {
            let count = skill_counts.entry(skill.clone()).or_insert_with(|| {
                skill_order.push(skill);
                0
            });
            *count += 1;
        }

        *growth.entry(sample.applied_at.date_naive()).or_insert(0) += 1;
    }

    let mut most_common_skill = String::new();
    let mut most_count = 0usize;
    for skill in skill_order {
        let count = skill_counts.get(&skill).copied().unwrap_or(0);
        if count > most_count {
            most_count = count;
            most_common_skill = skill;
        }
    }

    let avg_match = if total_applicants > 0 {
        (match_sum as f64 / total_applicants as f64 * 10.0).round() / 10.0
    } else {
        0.0
    };

    Ok(InternshipAnalytics {
        total_applicants,
        avg_match,
        highest_score,
        most_common_skill,
        growth_chart: growth
            .into_iter()
            .map(|(date, count)| GrowthPoint { date, count })
            .collect(),
    })
}

/// The applicant's distinct skills, lower-cased, declared before extracted,
/// each in the order it was listed.
fn skills_in_order(profile: &CandidateProfile) -> Vec<String> {
    let mut seen = HashSet::new();
    profile
        .declared_skills
        .iter()
        .chain(&profile.extracted_skills)
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

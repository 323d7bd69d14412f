use serde::{Deserialize, Serialize};

use crate::matching::normalizer::SkillSet;

/// Skill-gap analysis of one candidate against one internship.
///
/// `matched_skills` and `missing_skills` partition the requirement list and
/// keep its original casing and order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_percentage: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Compares every required skill (case-insensitively) against the candidate's set.
///
/// An internship without requirements cannot be matched: the result is 0% with
/// both lists empty, whatever the candidate has.
pub fn calculate_match(candidate_skills: &SkillSet, required_skills: &[String]) -> MatchResult {
    if required_skills.is_empty() {
        return MatchResult::default();
    }

    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = required_skills
        .iter()
        .cloned()
        .partition(|skill| candidate_skills.contains(skill));

    MatchResult {
        match_percentage: percentage_half_up(matched_skills.len(), required_skills.len()),
        matched_skills,
        missing_skills,
    }
}

/// round(100 × part / whole), halves rounded up, in integer arithmetic.
fn percentage_half_up(part: usize, whole: usize) -> u8 {
    let pct = (200 * part + whole) / (2 * whole);
    pct.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> SkillSet {
        items.iter().collect()
    }

    fn reqs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partial_match_rounds_and_keeps_order() {
        let result = calculate_match(&skills(&["react", "python"]), &reqs(&["react", "node", "sql"]));
        assert_eq!(result.match_percentage, 33);
        assert_eq!(result.matched_skills, reqs(&["react"]));
        assert_eq!(result.missing_skills, reqs(&["node", "sql"]));
    }

    #[test]
    fn test_empty_requirements_is_zero_policy() {
        let result = calculate_match(&skills(&["react"]), &[]);
        assert_eq!(result.match_percentage, 0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());

        let result = calculate_match(&SkillSet::default(), &[]);
        assert_eq!(result, MatchResult::default());
    }

    #[test]
    fn test_superset_is_full_match_and_preserves_casing() {
        let result = calculate_match(
            &skills(&["react", "node", "sql", "docker"]),
            &reqs(&["React", "Node", "SQL"]),
        );
        assert_eq!(result.match_percentage, 100);
        assert_eq!(result.matched_skills, reqs(&["React", "Node", "SQL"]));
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_disjoint_is_zero_match() {
        let result = calculate_match(&skills(&["figma"]), &reqs(&["rust", "go"]));
        assert_eq!(result.match_percentage, 0);
        assert!(result.matched_skills.is_empty());
        assert_eq!(result.missing_skills, reqs(&["rust", "go"]));
    }

    #[test]
    fn test_half_rounds_up() {
        // 1 of 8 = 12.5% → 13
        let result = calculate_match(
            &skills(&["a"]),
            &reqs(&["a", "b", "c", "d", "e", "f", "g", "h"]),
        );
        assert_eq!(result.match_percentage, 13);
        // 2 of 3 = 66.67% → 67
        let result = calculate_match(&skills(&["a", "b"]), &reqs(&["a", "b", "c"]));
        assert_eq!(result.match_percentage, 67);
    }

    #[test]
    fn test_partition_covers_every_requirement() {
        let required = reqs(&["Rust", "rust", "Kafka", "SQL", "Docker"]);
        let result = calculate_match(&skills(&["rust", "docker"]), &required);
        assert_eq!(
            result.matched_skills.len() + result.missing_skills.len(),
            required.len()
        );
        for skill in &result.matched_skills {
            assert!(!result.missing_skills.contains(skill));
        }
    }

    #[test]
    fn test_is_referentially_pure() {
        let candidate = skills(&["react", "sql"]);
        let required = reqs(&["react", "node", "sql"]);
        assert_eq!(
            calculate_match(&candidate, &required),
            calculate_match(&candidate, &required)
        );
    }
}

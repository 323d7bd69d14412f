use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// A deduplicated set of lower-cased skill tokens.
///
/// Iteration order is incidental (lexicographic); nothing downstream relies on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    /// Case-insensitive membership test.
    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill.trim().to_lowercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SkillSet(
            iter.into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

/// Merges any number of skill-source lists (declared, resume-extracted, ...)
/// into one lower-cased, deduplicated set. Empty sources contribute nothing.
pub fn normalize_skills<I, S>(sources: I) -> SkillSet
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sources.into_iter().flatten().collect()
}

/// Trims skill names as entered and drops blanks and case-insensitive repeats.
/// The first spelling wins and list order is kept.
pub fn dedup_skill_names(skills: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}

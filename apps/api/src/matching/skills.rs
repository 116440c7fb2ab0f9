//! Skill configuration and the fuzzy 70/30 skill-coverage score.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::fuzzy::fuzzy_match;
use crate::matching::round2;

/// Share of the weighted score carried by essential skills.
pub const ESSENTIAL_WEIGHT: f64 = 70.0;
/// Share of the weighted score carried by preferred skills.
pub const PREFERRED_WEIGHT: f64 = 30.0;

/// Skill term → matched, in evaluation order (essential first, then preferred).
pub type SkillMatchResult = IndexMap<String, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Essential,
    Preferred,
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillCategory::Essential => write!(f, "essential"),
            SkillCategory::Preferred => write!(f, "preferred"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SkillConfigError {
    #[error("{category} skill list contains an empty term")]
    EmptyTerm { category: SkillCategory },

    #[error("skill '{term}' appears in both the essential and preferred lists")]
    Overlapping { term: String },
}

/// Validated essential/preferred skill lists for one evaluation run.
///
/// Guarantees: no empty terms, and no literal term in both lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillSet {
    essential: Vec<String>,
    preferred: Vec<String>,
}

impl SkillSet {
    pub fn new(essential: Vec<String>, preferred: Vec<String>) -> Result<Self, SkillConfigError> {
        if essential.iter().any(|s| s.trim().is_empty()) {
            return Err(SkillConfigError::EmptyTerm {
                category: SkillCategory::Essential,
            });
        }
        if preferred.iter().any(|s| s.trim().is_empty()) {
            return Err(SkillConfigError::EmptyTerm {
                category: SkillCategory::Preferred,
            });
        }
        if let Some(term) = preferred.iter().find(|p| essential.contains(p)) {
            return Err(SkillConfigError::Overlapping { term: term.clone() });
        }

        Ok(Self {
            essential,
            preferred,
        })
    }

    pub fn essential(&self) -> &[String] {
        &self.essential
    }

    pub fn preferred(&self) -> &[String] {
        &self.preferred
    }

    /// All terms tagged with their category, essential first.
    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, SkillCategory)> {
        self.essential
            .iter()
            .map(|s| (s.as_str(), SkillCategory::Essential))
            .chain(
                self.preferred
                    .iter()
                    .map(|s| (s.as_str(), SkillCategory::Preferred)),
            )
    }
}

/// Per-candidate result shared by every scoring policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEvaluation {
    pub matches: SkillMatchResult,
    pub weighted_score: f64,
    pub essential_hits: usize,
    pub preferred_hits: usize,
}

/// Scores `text` against the skill lists with fuzzy matching.
///
/// Every term in `essential ++ preferred` gets its own match call. When the same
/// literal term occurs in both lists, the later (preferred) outcome overwrites the
/// earlier entry and both hit counts read that final value. Use [`SkillSet`] to rule
/// this out up front.
pub fn evaluate_skills(
    text: &str,
    essential: &[String],
    preferred: &[String],
    threshold: f64,
) -> SkillEvaluation {
    let mut matches = SkillMatchResult::new();
    for skill in essential.iter().chain(preferred) {
        matches.insert(skill.clone(), fuzzy_match(skill, text, threshold));
    }

    let essential_hits = count_hits(&matches, essential);
    let preferred_hits = count_hits(&matches, preferred);

    let weighted_score = round2(
        coverage_share(essential_hits, essential.len(), ESSENTIAL_WEIGHT)
            + coverage_share(preferred_hits, preferred.len(), PREFERRED_WEIGHT),
    );

    SkillEvaluation {
        matches,
        weighted_score,
        essential_hits,
        preferred_hits,
    }
}

pub(crate) fn count_hits(matches: &SkillMatchResult, skills: &[String]) -> usize {
    skills
        .iter()
        .filter(|s| matches.get(s.as_str()).copied().unwrap_or(false))
        .count()
}

/// `hits / total × weight`, or 0 for an empty list.
fn coverage_share(hits: usize, total: usize, weight: f64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    hits as f64 / total as f64 * weight
}

/// Splits a comma-separated skill string, trimming pieces and dropping empty ones.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

//! Scoring policies: selectable strategies turning a candidate text into a `SkillEvaluation`.
//!
//! `FuzzySkillPolicy`: typo-tolerant token matching, plain 70/30 coverage, bounded to [0, 100].
//! `ExperienceWeightedPolicy`: exact containment, weights from declared years, may exceed 100.
//!
//! The two produce different numbers for identical inputs; callers pick one explicitly.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matching::experience::{evaluate_with_experience, ExperienceMap};
use crate::matching::fuzzy::DEFAULT_THRESHOLD;
use crate::matching::skills::{evaluate_skills, SkillEvaluation, SkillSet};

pub trait ScoringPolicy: Send + Sync {
    fn evaluate(&self, text: &str, skills: &SkillSet) -> SkillEvaluation;

    /// Stable identifier reported alongside results.
    fn kind(&self) -> PolicyKind;
}

#[derive(Debug, Clone, Copy)]
pub struct FuzzySkillPolicy {
    pub threshold: f64,
}

impl Default for FuzzySkillPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ScoringPolicy for FuzzySkillPolicy {
    fn evaluate(&self, text: &str, skills: &SkillSet) -> SkillEvaluation {
        evaluate_skills(text, skills.essential(), skills.preferred(), self.threshold)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Fuzzy
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExperienceWeightedPolicy {
    pub experience: ExperienceMap,
    /// Cap each skill's weight at the 2.0 normalization ceiling.
    pub clamp_weight: bool,
}

impl ScoringPolicy for ExperienceWeightedPolicy {
    fn evaluate(&self, text: &str, skills: &SkillSet) -> SkillEvaluation {
        evaluate_with_experience(
            text,
            skills.essential(),
            skills.preferred(),
            &self.experience,
            self.clamp_weight,
        )
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::ExperienceWeighted
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Fuzzy,
    ExperienceWeighted,
}

impl std::str::FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fuzzy" => Ok(PolicyKind::Fuzzy),
            "experience_weighted" => Ok(PolicyKind::ExperienceWeighted),
            other => Err(format!(
                "unknown scoring policy '{other}' (expected 'fuzzy' or 'experience_weighted')"
            )),
        }
    }
}

/// Everything needed to instantiate either policy. Fields irrelevant to the
/// selected kind are ignored.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub kind: PolicyKind,
    pub threshold: f64,
    pub experience: ExperienceMap,
    pub clamp_weight: bool,
}

impl PolicyConfig {
    pub fn build(self) -> Arc<dyn ScoringPolicy> {
        match self.kind {
            PolicyKind::Fuzzy => Arc::new(FuzzySkillPolicy {
                threshold: self.threshold,
            }),
            PolicyKind::ExperienceWeighted => Arc::new(ExperienceWeightedPolicy {
                experience: self.experience,
                clamp_weight: self.clamp_weight,
            }),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::matching::skills::{SkillEvaluation, SkillMatchResult, SkillSet};
use crate::matching::tier::MatchTier;

/// Immutable per-candidate summary row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub candidate: String,
    pub essential_hits: usize,
    pub essential_total: usize,
    pub preferred_hits: usize,
    pub preferred_total: usize,
    pub weighted_score: f64,
    pub tier: MatchTier,
    pub skill_matches: SkillMatchResult,
}

impl CandidateScore {
    pub fn new(candidate: impl Into<String>, skills: &SkillSet, evaluation: SkillEvaluation) -> Self {
        Self {
            candidate: candidate.into(),
            essential_hits: evaluation.essential_hits,
            essential_total: skills.essential().len(),
            preferred_hits: evaluation.preferred_hits,
            preferred_total: skills.preferred().len(),
            tier: MatchTier::from_score(evaluation.weighted_score),
            weighted_score: evaluation.weighted_score,
            skill_matches: evaluation.matches,
        }
    }
}

/// Sorts by weighted score, highest first. Equal scores keep their input order.
#[allow(dead_code)]
pub fn rank_candidates(scores: Vec<CandidateScore>) -> Vec<CandidateScore> {
    rank_by_score(scores, |s| s.weighted_score)
}

/// Stable descending sort of any records carrying a score.
pub fn rank_by_score<T>(mut items: Vec<T>, score: impl Fn(&T) -> f64) -> Vec<T> {
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(name: &str, weighted_score: f64) -> CandidateScore {
        let skills = SkillSet::default();
        CandidateScore::new(
            name,
            &skills,
            SkillEvaluation {
                matches: SkillMatchResult::new(),
                weighted_score,
                essential_hits: 0,
                preferred_hits: 0,
            },
        )
    }

    fn names(ranked: &[CandidateScore]) -> Vec<&str> {
        ranked.iter().map(|s| s.candidate.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending() {
        let ranked = rank_candidates(vec![score("a", 10.0), score("b", 90.0), score("c", 50.0)]);
        assert_eq!(names(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank_candidates(vec![
            score("first", 70.0),
            score("top", 100.0),
            score("second", 70.0),
            score("third", 70.0),
        ]);
        assert_eq!(names(&ranked), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_empty_batch() {
        assert!(rank_candidates(vec![]).is_empty());
    }

    #[test]
    fn test_tier_derived_from_score() {
        assert_eq!(score("x", 85.0).tier, MatchTier::High);
        assert_eq!(score("y", 60.0).tier, MatchTier::Medium);
        assert_eq!(score("z", 12.5).tier, MatchTier::Low);
    }

    #[test]
    fn test_totals_come_from_skill_set() {
        let skills = SkillSet::new(vec!["Rust".into(), "Go".into()], vec!["Zig".into()]).unwrap();
        let eval = SkillEvaluation {
            matches: SkillMatchResult::new(),
            weighted_score: 35.0,
            essential_hits: 1,
            preferred_hits: 0,
        };
        let s = CandidateScore::new("c", &skills, eval);
        assert_eq!((s.essential_hits, s.essential_total), (1, 2));
        assert_eq!((s.preferred_hits, s.preferred_total), (0, 1));
    }
}

//! Experience-weighted scoring: exact case-insensitive containment, each matched
//! skill weighted by declared years.
//!
//! Percentages are normalized against an assumed ceiling of weight 2.0 per skill
//! (10 years). Weights above the ceiling are NOT clamped unless asked to, so a very
//! experienced candidate can legitimately score above 100.

use std::collections::HashMap;

use crate::matching::round2;
use crate::matching::skills::{
    count_hits, SkillEvaluation, SkillMatchResult, ESSENTIAL_WEIGHT, PREFERRED_WEIGHT,
};

/// Skill term → declared years. Missing skills count as 0 years.
pub type ExperienceMap = HashMap<String, u32>;

pub const WEIGHT_PER_YEAR: f64 = 0.1;
/// Weight per skill the percentages are normalized against.
pub const ASSUMED_WEIGHT_CEILING: f64 = 2.0;

/// `1 + 0.1 × years`, optionally capped at [`ASSUMED_WEIGHT_CEILING`].
pub fn experience_weight(years: u32, clamp: bool) -> f64 {
    let weight = 1.0 + WEIGHT_PER_YEAR * years as f64;
    if clamp {
        weight.min(ASSUMED_WEIGHT_CEILING)
    } else {
        weight
    }
}

/// Total experience-weighted score for `text`, rounded to two places.
#[allow(dead_code)]
pub fn calculate_match(
    text: &str,
    essential: &[String],
    preferred: &[String],
    experience: &ExperienceMap,
    clamp_weight: bool,
) -> f64 {
    evaluate_with_experience(text, essential, preferred, experience, clamp_weight).weighted_score
}

/// Full evaluation under the experience-weighted policy.
pub fn evaluate_with_experience(
    text: &str,
    essential: &[String],
    preferred: &[String],
    experience: &ExperienceMap,
    clamp_weight: bool,
) -> SkillEvaluation {
    let text_lower = text.to_lowercase();

    let mut matches = SkillMatchResult::new();
    for skill in essential.iter().chain(preferred) {
        matches.insert(skill.clone(), contains_skill(&text_lower, skill));
    }

    let weighted_sum = |skills: &[String]| -> f64 {
        skills
            .iter()
            .filter(|s| matches.get(s.as_str()).copied().unwrap_or(false))
            .map(|s| experience_weight(years_for(experience, s), clamp_weight))
            .sum()
    };

    let essential_percent = percent_of_ceiling(weighted_sum(essential), essential.len());
    let preferred_percent = percent_of_ceiling(weighted_sum(preferred), preferred.len());

    let weighted_score = round2(
        ESSENTIAL_WEIGHT / 100.0 * essential_percent + PREFERRED_WEIGHT / 100.0 * preferred_percent,
    );

    SkillEvaluation {
        essential_hits: count_hits(&matches, essential),
        preferred_hits: count_hits(&matches, preferred),
        matches,
        weighted_score,
    }
}

fn contains_skill(text_lower: &str, skill: &str) -> bool {
    let skill = skill.to_lowercase();
    !skill.trim().is_empty() && text_lower.contains(&skill)
}

fn years_for(experience: &ExperienceMap, skill: &str) -> u32 {
    experience.get(skill).copied().unwrap_or(0)
}

fn percent_of_ceiling(score: f64, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    score / (ASSUMED_WEIGHT_CEILING * total as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn years(pairs: &[(&str, u32)]) -> ExperienceMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    const RESUME: &str = "Five years of Python and PostgreSQL; some exposure to Kubernetes.";

    #[test]
    fn test_weight_values() {
        assert_eq!(experience_weight(0, false), 1.0);
        assert_eq!(experience_weight(10, false), 2.0);
        assert!((experience_weight(20, false) - 3.0).abs() < 1e-12);
        assert_eq!(experience_weight(20, true), 2.0);
        assert_eq!(experience_weight(5, true), 1.5);
    }

    #[test]
    fn test_ten_years_contributes_exactly_two() {
        // one essential skill, matched with weight 2.0 → 100% essential → 70 total
        let score = calculate_match(
            RESUME,
            &skills(&["Python"]),
            &[],
            &years(&[("Python", 10)]),
            false,
        );
        assert_eq!(score, 70.0);
    }

    #[test]
    fn test_zero_years_contributes_one() {
        let score = calculate_match(RESUME, &skills(&["Python"]), &[], &years(&[]), false);
        assert_eq!(score, 35.0);
    }

    #[test]
    fn test_unmatched_skill_contributes_nothing_regardless_of_years() {
        let score = calculate_match(
            RESUME,
            &skills(&["Haskell"]),
            &skills(&["Erlang"]),
            &years(&[("Haskell", 30), ("Erlang", 30)]),
            false,
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_exact_substring_not_fuzzy() {
        // "Pythn" is a typo; containment does not tolerate it
        let eval = evaluate_with_experience(RESUME, &skills(&["Pythn"]), &[], &years(&[]), false);
        assert_eq!(eval.matches.get("Pythn"), Some(&false));
        assert_eq!(eval.essential_hits, 0);
    }

    #[test]
    fn test_containment_is_case_insensitive_and_partial() {
        // "sql" is contained in "postgresql"
        let eval = evaluate_with_experience(RESUME, &skills(&["SQL"]), &[], &years(&[]), false);
        assert_eq!(eval.essential_hits, 1);
    }

    #[test]
    fn test_unclamped_score_can_exceed_one_hundred() {
        let score = calculate_match(
            RESUME,
            &skills(&["Python"]),
            &skills(&["Kubernetes"]),
            &years(&[("Python", 30), ("Kubernetes", 30)]),
            false,
        );
        // weight 4.0 on a 2.0 ceiling → 200% on both sides
        assert_eq!(score, 200.0);
    }

    #[test]
    fn test_clamped_score_tops_out_at_one_hundred() {
        let score = calculate_match(
            RESUME,
            &skills(&["Python"]),
            &skills(&["Kubernetes"]),
            &years(&[("Python", 30), ("Kubernetes", 30)]),
            true,
        );
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_mixed_weights() {
        // essential: Python (5y → 1.5) matched, Rust unmatched → 1.5 / 4 = 37.5%
        // preferred: Kubernetes (0y → 1.0) matched → 1.0 / 2 = 50%
        // 0.7 × 37.5 + 0.3 × 50 = 26.25 + 15 = 41.25
        let score = calculate_match(
            RESUME,
            &skills(&["Python", "Rust"]),
            &skills(&["Kubernetes"]),
            &years(&[("Python", 5)]),
            false,
        );
        assert_eq!(score, 41.25);
    }

    #[test]
    fn test_empty_lists_score_zero() {
        assert_eq!(calculate_match(RESUME, &[], &[], &years(&[]), false), 0.0);
    }

    #[test]
    fn test_empty_term_never_matches() {
        let eval = evaluate_with_experience(RESUME, &skills(&[""]), &[], &years(&[]), false);
        assert_eq!(eval.essential_hits, 0);
    }
}

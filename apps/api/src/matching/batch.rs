//! Batch scoring. Candidates are independent, so they are scored in parallel on the
//! rayon pool; the output order depends only on scores and input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::policy::ScoringPolicy;
use crate::matching::ranking::{rank_by_score, CandidateScore};
use crate::matching::similarity::similarity;
use crate::matching::skills::SkillSet;

/// Plain-text candidate as handed over by ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateText {
    pub name: String,
    pub text: String,
}

/// One scored candidate plus its optional document similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Position of the candidate in the input slice.
    pub input_index: usize,
    pub score: CandidateScore,
    pub similarity: Option<f64>,
}

/// Scores every candidate under `policy` and returns them ranked (stable, descending).
#[allow(dead_code)]
pub fn score_batch(
    candidates: &[CandidateText],
    skills: &SkillSet,
    policy: &dyn ScoringPolicy,
) -> Vec<CandidateScore> {
    score_batch_with_similarity(candidates, skills, policy, None)
        .into_iter()
        .map(|scored| scored.score)
        .collect()
}

/// Like [`score_batch`], additionally computing similarity against `description`
/// when one is given. Similarity never influences the ranking.
pub fn score_batch_with_similarity(
    candidates: &[CandidateText],
    skills: &SkillSet,
    policy: &dyn ScoringPolicy,
    description: Option<&str>,
) -> Vec<ScoredCandidate> {
    let scored: Vec<ScoredCandidate> = candidates
        .par_iter()
        .enumerate()
        .map(|(input_index, candidate)| {
            let evaluation = policy.evaluate(&candidate.text, skills);
            debug!(
                candidate = %candidate.name,
                score = evaluation.weighted_score,
                essential_hits = evaluation.essential_hits,
                preferred_hits = evaluation.preferred_hits,
                "Scored candidate"
            );
            ScoredCandidate {
                input_index,
                score: CandidateScore::new(candidate.name.clone(), skills, evaluation),
                similarity: description.map(|d| similarity(&candidate.text, d)),
            }
        })
        .collect();

    rank_by_score(scored, |s| s.score.weighted_score)
}

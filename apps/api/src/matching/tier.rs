use serde::{Deserialize, Serialize};

pub const HIGH_THRESHOLD: f64 = 80.0;
pub const MEDIUM_THRESHOLD: f64 = 60.0;

/// Qualitative bucket for a score. Total over the real line; NaN lands in `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

impl MatchTier {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            MatchTier::High
        } else if score >= MEDIUM_THRESHOLD {
            MatchTier::Medium
        } else {
            MatchTier::Low
        }
    }

    #[allow(dead_code)]
    pub fn label(&self) -> &'static str {
        match self {
            MatchTier::High => "High",
            MatchTier::Medium => "Medium",
            MatchTier::Low => "Low",
        }
    }
}

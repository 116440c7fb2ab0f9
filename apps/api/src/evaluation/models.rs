use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::batch::CandidateText;
use crate::matching::experience::ExperienceMap;
use crate::matching::policy::PolicyKind;
use crate::matching::ranking::CandidateScore;

/// Job configuration shared by every candidate in a batch.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationSettings {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub essential_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub experience: ExperienceMap,
    #[serde(default)]
    pub policy: PolicyKind,
    /// Falls back to `MATCH_THRESHOLD`.
    pub threshold: Option<f64>,
    /// Falls back to `CLAMP_EXPERIENCE_WEIGHT`.
    pub clamp_experience_weight: Option<bool>,
    #[serde(default = "default_true")]
    pub include_similarity: bool,
    #[serde(default)]
    pub include_summary: bool,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            description: String::new(),
            essential_skills: Vec::new(),
            preferred_skills: Vec::new(),
            experience: ExperienceMap::new(),
            policy: PolicyKind::default(),
            threshold: None,
            clamp_experience_weight: None,
            include_similarity: true,
            include_summary: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// POST /api/v1/match/text body: settings plus already-extracted candidate texts.
#[derive(Debug, Deserialize)]
pub struct MatchTextRequest {
    #[serde(flatten)]
    pub settings: EvaluationSettings,
    #[serde(default)]
    pub candidates: Vec<CandidateText>,
}

/// A raw resume file from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A candidate that could not be scored (ingestion failed). The rest of the batch proceeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateFailure {
    pub candidate: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport {
    #[serde(flatten)]
    pub score: CandidateScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Ranked outcome of one batch evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub policy: PolicyKind,
    pub essential_total: usize,
    pub preferred_total: usize,
    /// Sorted by weighted score, highest first; ties keep submission order.
    pub candidates: Vec<CandidateReport>,
    pub failures: Vec<CandidateFailure>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    pub candidate_text: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SimilarityResponse {
    pub similarity: f64,
}

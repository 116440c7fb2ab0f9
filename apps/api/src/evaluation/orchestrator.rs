//! Batch orchestration: ingestion → scoring → similarity → summary, per candidate.
//!
//! Scoring is CPU-bound and runs inside `spawn_blocking` (rayon fans out from there).
//! Ingestion and summary failures are recorded per candidate and never abort the batch.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::models::{
    BatchReport, CandidateFailure, CandidateReport, EvaluationSettings, UploadedDocument,
};
use crate::ingest::extract_document;
use crate::matching::batch::{score_batch_with_similarity, CandidateText};
use crate::matching::policy::PolicyConfig;
use crate::matching::skills::SkillSet;
use crate::state::AppState;
use crate::summary::summarize_isolated;

/// Extracts text from every upload. Order of successes and failures follows the input.
pub async fn ingest_documents(
    documents: Vec<UploadedDocument>,
) -> (Vec<CandidateText>, Vec<CandidateFailure>) {
    let tasks = documents.into_iter().map(|doc| async move {
        let name = doc.file_name.clone();
        // pdf-extract can panic on malformed files; the blocking task contains it.
        let extracted = tokio::task::spawn_blocking(move || {
            extract_document(
                doc.content_type.as_deref(),
                Some(&doc.file_name),
                &doc.bytes,
            )
        })
        .await;

        match extracted {
            Ok(Ok(text)) => Ok(CandidateText { name, text }),
            Ok(Err(e)) => Err(CandidateFailure {
                candidate: name,
                reason: e.to_string(),
            }),
            Err(join_error) => Err(CandidateFailure {
                candidate: name,
                reason: format!("Text extraction aborted: {join_error}"),
            }),
        }
    });

    let mut candidates = Vec::new();
    let mut failures = Vec::new();
    for result in futures::future::join_all(tasks).await {
        match result {
            Ok(candidate) => candidates.push(candidate),
            Err(failure) => {
                warn!(candidate = %failure.candidate, reason = %failure.reason, "Ingestion failed");
                failures.push(failure);
            }
        }
    }
    (candidates, failures)
}

/// Scores a batch of candidate texts and assembles the ranked report.
///
/// Rejects the whole request only for invalid skill configuration or threshold;
/// everything per-candidate is defined, not thrown.
pub async fn evaluate_batch(
    state: &AppState,
    settings: EvaluationSettings,
    candidates: Vec<CandidateText>,
    failures: Vec<CandidateFailure>,
) -> Result<BatchReport, AppError> {
    let threshold = settings.threshold.unwrap_or(state.config.match_threshold);
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(AppError::Validation(format!(
            "threshold must be in (0, 1], got {threshold}"
        )));
    }

    let skills = SkillSet::new(settings.essential_skills, settings.preferred_skills)?;
    let policy_kind = settings.policy;
    let policy = PolicyConfig {
        kind: policy_kind,
        threshold,
        experience: settings.experience,
        clamp_weight: settings
            .clamp_experience_weight
            .unwrap_or(state.config.clamp_experience_weight),
    }
    .build();

    let run_id = Uuid::new_v4();
    info!(
        %run_id,
        policy = ?policy_kind,
        candidates = candidates.len(),
        failures = failures.len(),
        "Evaluating batch"
    );

    let candidates = Arc::new(candidates);
    let description = settings
        .include_similarity
        .then_some(settings.description);

    let scored = {
        let candidates = Arc::clone(&candidates);
        let skills = skills.clone();
        tokio::task::spawn_blocking(move || {
            score_batch_with_similarity(
                &candidates,
                &skills,
                policy.as_ref(),
                description.as_deref(),
            )
        })
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "spawn_blocking failed in batch scoring: {e}"
            ))
        })?
    };

    let summaries: Vec<Option<String>> = if settings.include_summary {
        let timeout = Duration::from_secs(state.config.summary_timeout_secs);
        // Each future owns its handles so the handler future stays Send
        stream::iter(0..candidates.len())
            .map(|i| {
                let candidates = Arc::clone(&candidates);
                let summarizer = Arc::clone(&state.summarizer);
                async move {
                    let c = &candidates[i];
                    let summary =
                        summarize_isolated(summarizer.as_ref(), &c.name, &c.text, timeout).await;
                    Some(summary)
                }
            })
            .buffered(state.config.summary_concurrency)
            .collect()
            .await
    } else {
        vec![None; candidates.len()]
    };

    let ranked: Vec<CandidateReport> = scored
        .into_iter()
        .map(|s| CandidateReport {
            summary: summaries[s.input_index].clone(),
            similarity: s.similarity,
            score: s.score,
        })
        .collect();

    info!(%run_id, scored = ranked.len(), "Batch evaluation complete");

    Ok(BatchReport {
        run_id,
        evaluated_at: Utc::now(),
        policy: policy_kind,
        essential_total: skills.essential().len(),
        preferred_total: skills.preferred().len(),
        candidates: ranked,
        failures,
    })
}

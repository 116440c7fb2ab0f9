//! Narrative candidate summaries. A collaborator of the scoring engine, never an input to it.
//!
//! Failures here must not affect scores: `summarize_isolated` turns every error or
//! timeout into a placeholder string recorded against the candidate.

mod prompts;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::{LlmClient, LlmError};
use prompts::{SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM};

/// Only the head of a resume is sent to the model.
pub const SUMMARY_INPUT_CHARS: usize = 4000;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("summaries are disabled (no API key configured)")]
    Disabled,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError>;
}

/// Summaries via the language-model API.
pub struct LlmSummaryGenerator(pub LlmClient);

#[async_trait]
impl SummaryGenerator for LlmSummaryGenerator {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        let prompt = build_prompt(text);
        Ok(self.0.call_text(&prompt, SUMMARY_SYSTEM).await?)
    }
}

/// Used when no API key is configured.
pub struct DisabledSummaryGenerator;

#[async_trait]
impl SummaryGenerator for DisabledSummaryGenerator {
    async fn summarize(&self, _text: &str) -> Result<String, SummaryError> {
        Err(SummaryError::Disabled)
    }
}

/// Runs the generator with a timeout and never fails.
pub async fn summarize_isolated(
    generator: &dyn SummaryGenerator,
    candidate: &str,
    text: &str,
    timeout: Duration,
) -> String {
    match tokio::time::timeout(timeout, generator.summarize(text)).await {
        Ok(Ok(summary)) => summary,
        Ok(Err(e)) => {
            warn!(candidate, error = %e, "Summary generation failed");
            placeholder(&e.to_string())
        }
        Err(_) => {
            warn!(candidate, timeout_secs = timeout.as_secs(), "Summary generation timed out");
            placeholder(&format!("timed out after {}s", timeout.as_secs()))
        }
    }
}

fn placeholder(reason: &str) -> String {
    format!("Summary unavailable: {reason}")
}

fn build_prompt(text: &str) -> String {
    let head: String = text.chars().take(SUMMARY_INPUT_CHARS).collect();
    SUMMARY_PROMPT_TEMPLATE.replace("{resume_text}", &head)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSummary(&'static str);

    #[async_trait]
    impl SummaryGenerator for FixedSummary {
        async fn summarize(&self, _text: &str) -> Result<String, SummaryError> {
            Ok(self.0.to_string())
        }
    }

    struct NeverFinishes;

    #[async_trait]
    impl SummaryGenerator for NeverFinishes {
        async fn summarize(&self, _text: &str) -> Result<String, SummaryError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let summary =
            summarize_isolated(&FixedSummary("Solid."), "a.pdf", "text", Duration::from_secs(5))
                .await;
        assert_eq!(summary, "Solid.");
    }

    #[tokio::test]
    async fn test_error_becomes_placeholder() {
        let summary =
            summarize_isolated(&DisabledSummaryGenerator, "a.pdf", "text", Duration::from_secs(5))
                .await;
        assert!(summary.starts_with("Summary unavailable:"));
        assert!(summary.contains("disabled"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_becomes_placeholder() {
        let summary =
            summarize_isolated(&NeverFinishes, "a.pdf", "text", Duration::from_secs(30)).await;
        assert_eq!(summary, "Summary unavailable: timed out after 30s");
    }

    #[test]
    fn test_prompt_truncates_long_resumes() {
        let long = "x".repeat(SUMMARY_INPUT_CHARS + 500);
        let prompt = build_prompt(&long);
        assert!(prompt.contains(&"x".repeat(SUMMARY_INPUT_CHARS)));
        assert!(!prompt.contains(&"x".repeat(SUMMARY_INPUT_CHARS + 1)));
        assert!(prompt.contains("Key strengths"));
    }

    #[test]
    fn test_prompt_truncates_on_char_boundaries() {
        let long = "é".repeat(SUMMARY_INPUT_CHARS + 10);
        let prompt = build_prompt(&long);
        assert_eq!(prompt.matches('é').count(), SUMMARY_INPUT_CHARS);
    }
}

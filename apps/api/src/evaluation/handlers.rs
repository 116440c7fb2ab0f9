//! Axum route handlers for the Match API.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::evaluation::models::{
    BatchReport, EvaluationSettings, MatchTextRequest, SimilarityRequest, SimilarityResponse,
    UploadedDocument,
};
use crate::evaluation::orchestrator::{evaluate_batch, ingest_documents};
use crate::matching::experience::ExperienceMap;
use crate::matching::similarity::similarity;
use crate::matching::skills::parse_skill_list;
use crate::state::AppState;

/// Multipart field carrying a resume file. May repeat.
const RESUME_FIELD: &str = "resume";

/// POST /api/v1/match/text
///
/// Scores already-extracted candidate texts. An empty candidate list yields an empty report.
pub async fn handle_match_text(
    State(state): State<AppState>,
    Json(request): Json<MatchTextRequest>,
) -> Result<Json<BatchReport>, AppError> {
    let report = evaluate_batch(&state, request.settings, request.candidates, vec![]).await?;
    Ok(Json(report))
}

/// POST /api/v1/match/upload
///
/// Multipart form: text fields for the job configuration plus one or more `resume` files.
/// Files that cannot be read are reported under `failures`; the rest are still scored.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchReport>, AppError> {
    let (settings, documents) = read_upload_form(multipart).await?;
    if documents.is_empty() {
        return Err(AppError::Validation(
            "at least one 'resume' file is required".to_string(),
        ));
    }

    let (candidates, failures) = ingest_documents(documents).await;
    let report = evaluate_batch(&state, settings, candidates, failures).await?;
    Ok(Json(report))
}

/// POST /api/v1/similarity
///
/// Document similarity alone, 0 to 100.
pub async fn handle_similarity(Json(request): Json<SimilarityRequest>) -> Json<SimilarityResponse> {
    Json(SimilarityResponse {
        similarity: similarity(&request.candidate_text, &request.description),
    })
}

async fn read_upload_form(
    mut multipart: Multipart,
) -> Result<(EvaluationSettings, Vec<UploadedDocument>), AppError> {
    let mut settings = EvaluationSettings::default();
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == RESUME_FIELD {
            let file_name = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("resume-{}", documents.len() + 1));
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read '{file_name}': {e}")))?;
            documents.push(UploadedDocument {
                file_name,
                content_type,
                bytes,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read field '{name}': {e}")))?;
        apply_form_field(&mut settings, &name, &value)?;
    }

    Ok((settings, documents))
}

fn apply_form_field(
    settings: &mut EvaluationSettings,
    name: &str,
    value: &str,
) -> Result<(), AppError> {
    let value = value.trim();
    match name {
        "description" => settings.description = value.to_string(),
        "essential_skills" => settings.essential_skills = parse_skill_list(value),
        "preferred_skills" => settings.preferred_skills = parse_skill_list(value),
        "experience" if !value.is_empty() => {
            settings.experience = serde_json::from_str::<ExperienceMap>(value).map_err(|e| {
                AppError::Validation(format!(
                    "experience must be a JSON object of skill to years: {e}"
                ))
            })?;
        }
        "policy" if !value.is_empty() => {
            settings.policy = value.parse().map_err(AppError::Validation)?;
        }
        "threshold" if !value.is_empty() => {
            settings.threshold = Some(parse_field(name, value)?);
        }
        "clamp_experience_weight" if !value.is_empty() => {
            settings.clamp_experience_weight = Some(parse_field(name, value)?);
        }
        "include_similarity" if !value.is_empty() => {
            settings.include_similarity = parse_field(name, value)?;
        }
        "include_summary" if !value.is_empty() => {
            settings.include_summary = parse_field(name, value)?;
        }
        _ => {}
    }
    Ok(())
}

fn parse_field<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Validation(format!("field '{name}' has an invalid value '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::policy::PolicyKind;

    fn apply(pairs: &[(&str, &str)]) -> Result<EvaluationSettings, AppError> {
        let mut settings = EvaluationSettings::default();
        for (name, value) in pairs {
            apply_form_field(&mut settings, name, value)?;
        }
        Ok(settings)
    }

    #[test]
    fn test_form_fields_populate_settings() {
        let settings = apply(&[
            ("description", " Data engineer "),
            ("essential_skills", "Python, SQL"),
            ("preferred_skills", "Docker,,Kubernetes "),
            ("experience", r#"{"Python": 4}"#),
            ("policy", "experience_weighted"),
            ("threshold", "0.75"),
            ("include_summary", "true"),
        ])
        .unwrap();

        assert_eq!(settings.description, "Data engineer");
        assert_eq!(settings.essential_skills, vec!["Python", "SQL"]);
        assert_eq!(settings.preferred_skills, vec!["Docker", "Kubernetes"]);
        assert_eq!(settings.experience.get("Python"), Some(&4));
        assert_eq!(settings.policy, PolicyKind::ExperienceWeighted);
        assert_eq!(settings.threshold, Some(0.75));
        assert!(settings.include_summary);
        assert!(settings.include_similarity);
    }

    #[test]
    fn test_blank_optional_fields_keep_defaults() {
        let settings = apply(&[("policy", ""), ("threshold", " "), ("experience", "")]).unwrap();
        assert_eq!(settings.policy, PolicyKind::Fuzzy);
        assert!(settings.threshold.is_none());
        assert!(settings.experience.is_empty());
    }

    #[test]
    fn test_bad_values_are_validation_errors() {
        assert!(matches!(
            apply(&[("threshold", "high")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            apply(&[("policy", "magic")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            apply(&[("experience", "[1, 2]")]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        assert!(apply(&[("submit", "Run Evaluation")]).is_ok());
    }
}

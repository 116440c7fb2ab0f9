//! Whole-document similarity: TF-IDF cosine over the pair {description, candidate}.
//!
//! The vector space is rebuilt for every pair, so IDF only distinguishes terms shared
//! by both documents from terms in one. Scores are independent per candidate.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::matching::stop_words::is_stop_word;

/// Tokens of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Cosine similarity of the TF-IDF vectors of `candidate_text` and `description_text`,
/// scaled to [0, 100]. Returns 0 when either document has no non-stop-word terms.
pub fn similarity(candidate_text: &str, description_text: &str) -> f64 {
    let description = term_counts(description_text);
    let candidate = term_counts(candidate_text);
    if description.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let documents = [&description, &candidate];
    let vocabulary: HashSet<&str> = documents
        .iter()
        .flat_map(|doc| doc.keys().map(String::as_str))
        .collect();

    let idf: HashMap<&str, f64> = vocabulary
        .into_iter()
        .map(|term| {
            let df = documents.iter().filter(|doc| doc.contains_key(term)).count();
            (term, smoothed_idf(documents.len(), df))
        })
        .collect();

    let description = weigh(&description, &idf);
    let candidate = weigh(&candidate, &idf);
    (cosine(&description, &candidate) * 100.0).clamp(0.0, 100.0)
}

fn weigh<'a>(counts: &'a HashMap<String, usize>, idf: &HashMap<&str, f64>) -> HashMap<&'a str, f64> {
    counts
        .iter()
        .map(|(term, &tf)| {
            let weight = idf.get(term.as_str()).copied().unwrap_or(0.0);
            (term.as_str(), tf as f64 * weight)
        })
        .collect()
}

/// Lower-cased token counts with stop words removed.
fn term_counts(text: &str) -> HashMap<String, usize> {
    let lowered = text.to_lowercase();
    let mut counts = HashMap::new();
    for token in TOKEN_PATTERN.find_iter(&lowered).map(|m| m.as_str()) {
        if !is_stop_word(token) {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// `ln((1 + n) / (1 + df)) + 1`
fn smoothed_idf(n_docs: usize, df: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0
}

fn cosine(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    let norm_a = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.values().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = a
        .iter()
        .filter_map(|(term, va)| b.get(term).map(|vb| va * vb))
        .sum();
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Senior Rust engineer to build distributed storage services. \
        Experience with Kubernetes and Postgres required.";

    #[test]
    fn test_empty_documents_score_zero() {
        assert_eq!(similarity("", JD), 0.0);
        assert_eq!(similarity("Rust Kubernetes", ""), 0.0);
        assert_eq!(similarity("", ""), 0.0);
    }

    #[test]
    fn test_only_stop_words_score_zero() {
        assert_eq!(similarity("the and of with", JD), 0.0);
        // single-character tokens are never terms
        assert_eq!(similarity("a b c d", JD), 0.0);
    }

    #[test]
    fn test_identical_documents_score_one_hundred() {
        let score = similarity(JD, JD);
        assert!((score - 100.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        assert_eq!(similarity("pastry chef bakery croissants", JD), 0.0);
    }

    #[test]
    fn test_overlap_scores_between_bounds() {
        let score = similarity("Rust developer running Postgres on Kubernetes", JD);
        assert!(score > 0.0 && score < 100.0, "got {score}");
    }

    #[test]
    fn test_more_overlap_scores_higher() {
        let weak = similarity("Rust hobbyist, mostly woodworking and gardening", JD);
        let strong = similarity(
            "Senior Rust engineer: distributed storage services on Kubernetes and Postgres",
            JD,
        );
        assert!(strong > weak, "strong={strong} weak={weak}");
    }

    #[test]
    fn test_known_value_for_small_pair() {
        // description {rust, kafka}, candidate {rust}: shared idf 1, unique idf ln(1.5)+1
        // cosine = 1 / sqrt(1 + (ln 1.5 + 1)^2)
        let unique = 1.5_f64.ln() + 1.0;
        let expected = 100.0 / (1.0 + unique * unique).sqrt();
        let score = similarity("rust", "rust kafka");
        assert!((score - expected).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_case_and_punctuation_are_ignored() {
        let a = similarity("RUST, Kubernetes!", "rust kubernetes");
        assert!((a - 100.0).abs() < 1e-9);
    }
}

// Matching engine: skill detection, weighted aggregation, document similarity, ranking.
// Pure and synchronous. No I/O, no LLM calls; ingestion and summaries live elsewhere.

pub mod batch;
pub mod experience;
pub mod fuzzy;
pub mod policy;
pub mod ranking;
pub mod similarity;
pub mod skills;
mod stop_words;
pub mod tier;

/// Rounds to two decimal places, the precision every reported percentage carries.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_truncates_to_two_places() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(70.0), 70.0);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn test_round2_sends_exact_ties_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
    }
}

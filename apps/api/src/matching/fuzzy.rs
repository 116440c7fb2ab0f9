//! Fuzzy skill detection.
//!
//! A skill term is considered present when any whitespace-separated token of the
//! candidate text reaches a similarity ratio of at least `threshold` against it.
//! The ratio is the Ratcliff/Obershelp "gestalt" measure: `2·M / (|a| + |b|)` where
//! `M` is the number of characters covered by recursively found longest common blocks.
//! Tolerant of plurals and small typos, at the cost of false positives on short terms.

use std::collections::HashMap;

/// Default minimum ratio for a token to count as a match.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Sequences at least this long have their over-represented characters excluded
/// from block seeding, mirroring the classic "autojunk" heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Returns true iff some token of `text` has a similarity ratio ≥ `threshold` with `term`.
///
/// Both sides are lower-cased. An empty (or whitespace-only) term never matches, and
/// empty text has no tokens, so it never matches either.
pub fn fuzzy_match(term: &str, text: &str, threshold: f64) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return false;
    }
    let term_chars: Vec<char> = term.chars().collect();
    let matcher = SequenceMatcher::new(&term_chars);

    text.split_whitespace().any(|word| {
        let word: Vec<char> = word.to_lowercase().chars().collect();
        matcher.ratio(&word) >= threshold
    })
}

/// Similarity ratio in [0, 1] between two strings, compared as-is.
///
/// Two empty strings are identical and score 1.0.
#[allow(dead_code)]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceMatcher::new(&b).ratio(&a)
}

/// Longest-matching-block matcher with the second sequence (`b`) indexed once,
/// so one skill term can be compared against many tokens cheaply.
struct SequenceMatcher<'a> {
    b: &'a [char],
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    fn new(b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let popular_limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= popular_limit);
        }

        Self { b, b2j }
    }

    fn ratio(&self, a: &[char]) -> f64 {
        let total = a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matching_chars(a) as f64 / total as f64
    }

    /// Total size of all matching blocks between `a` and `b`.
    fn matching_chars(&self, a: &[char]) -> usize {
        let mut matched = 0;
        let mut queue = vec![(0, a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }

    /// Finds the longest block `a[i..i+k] == b[j..j+k]` inside the given window.
    /// Ties resolve to the earliest `i`, then the earliest `j`.
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let b = self.b;
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

        // j2len[j] = length of the longest block ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        // Grow the block over characters excluded from seeding.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}

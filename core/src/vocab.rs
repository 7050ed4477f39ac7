use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::config::DEFAULT_FUZZY_CUTOFF;
use crate::similarity::{SequenceMatcher, StringSimilarity};

/// The frozen set of terms seen at build time, used to repair misspelled query tokens.
#[derive(Clone)]
pub struct Vocabulary {
    /// Sorted, deduplicated. Position is the tie-break order for corrections.
    terms: Vec<String>,
    members: HashSet<String>,
    similarity: Arc<dyn StringSimilarity>,
    cutoff: f64,
}

impl fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vocabulary")
            .field("terms", &self.terms.len())
            .field("cutoff", &self.cutoff)
            .finish()
    }
}

impl Vocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        terms.sort_unstable();
        terms.dedup();
        let members = terms.iter().cloned().collect();
        Self { terms, members, similarity: Arc::new(SequenceMatcher), cutoff: DEFAULT_FUZZY_CUTOFF }
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_similarity<S: StringSimilarity + 'static>(mut self, similarity: S) -> Self {
        self.similarity = Arc::new(similarity);
        self
    }

    pub fn contains(&self, term: &str) -> bool { self.members.contains(term) }
    pub fn terms(&self) -> &[String] { &self.terms }
    pub fn len(&self) -> usize { self.terms.len() }
    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Replace `token` with its closest vocabulary term. Known terms and
    /// `protected` terms are returned as-is; so is a token with no candidate
    /// scoring at or above the cutoff.
    pub fn correct(&self, token: &str, protected: &HashSet<String>) -> String {
        if self.contains(token) || protected.contains(token) {
            return token.to_string();
        }
        let mut best: Option<(&str, f64)> = None;
        for term in &self.terms {
            // candidate first: the ratio is not symmetric
            let ratio = self.similarity.ratio(term, token);
            if ratio < self.cutoff {
                continue;
            }
            // strictly greater keeps the lexicographically first term on ties
            if best.map_or(true, |(_, r)| ratio > r) {
                best = Some((term, ratio));
            }
        }
        match best {
            Some((term, ratio)) => {
                tracing::trace!(token, corrected = term, ratio, "fuzzy correction");
                term.to_string()
            }
            None => token.to_string(),
        }
    }

    /// Up to `n` candidates for `token` at or above the cutoff, best first;
    /// equal ratios keep vocabulary order.
    pub fn suggestions(&self, token: &str, n: usize) -> Vec<(String, f64)> {
        let mut scored: Vec<(&String, f64)> = self
            .terms
            .iter()
            .map(|t| (t, self.similarity.ratio(t, token)))
            .filter(|(_, r)| *r >= self.cutoff)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().take(n).map(|(t, r)| (t.clone(), r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new(["shirt", "cotton", "boots", "leather", "acme", "cotton"])
    }

    #[test]
    fn dedups_and_sorts() {
        let v = vocab();
        assert_eq!(v.terms(), &["acme", "boots", "cotton", "leather", "shirt"]);
    }

    #[test]
    fn corrects_misspelling() {
        let v = vocab();
        assert_eq!(v.correct("cotten", &HashSet::new()), "cotton");
        assert_eq!(v.correct("shrt", &HashSet::new()), "shirt");
    }

    #[test]
    fn leaves_unmatched_and_known_tokens_alone() {
        let v = vocab();
        assert_eq!(v.correct("zzz", &HashSet::new()), "zzz");
        assert_eq!(v.correct("boots", &HashSet::new()), "boots");
    }

    #[test]
    fn protected_terms_are_never_corrected() {
        let v = vocab();
        let protected: HashSet<String> = ["cottons".to_string()].into_iter().collect();
        assert_eq!(v.correct("cottons", &protected), "cottons");
        assert_eq!(v.correct("cottons", &HashSet::new()), "cotton");
    }

    #[test]
    fn ties_go_to_first_sorted_term() {
        // "ab" is 0.8 away from both "abc" and "abd"
        let v = Vocabulary::new(["abd", "abc"]);
        assert_eq!(v.correct("ab", &HashSet::new()), "abc");
    }

    #[test]
    fn cutoff_is_inclusive() {
        // ratio("abcd", "bcde") == 0.75
        let v = Vocabulary::new(["bcde"]).with_cutoff(0.75);
        assert_eq!(v.correct("abcd", &HashSet::new()), "bcde");
        let v = Vocabulary::new(["bcde"]).with_cutoff(0.76);
        assert_eq!(v.correct("abcd", &HashSet::new()), "abcd");
    }

    #[test]
    fn candidate_is_compared_against_token() {
        // ratio("cctec", "ectaec") is 8/11, the reverse order only 4/11
        let v = Vocabulary::new(["cctec"]);
        assert_eq!(v.correct("ectaec", &HashSet::new()), "cctec");
        let s = v.suggestions("ectaec", 1);
        assert_eq!(s.len(), 1);
        assert!((s[0].1 - 8.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn suggestions_are_ranked() {
        let v = Vocabulary::new(["boot", "boots", "booth", "cotton"]).with_cutoff(0.6);
        let s = v.suggestions("boots", 2);
        assert_eq!(s[0].0, "boots");
        assert_eq!(s.len(), 2);
        assert!(s[0].1 >= s[1].1);
    }

    struct FirstLetter;
    impl StringSimilarity for FirstLetter {
        fn ratio(&self, a: &str, b: &str) -> f64 {
            if a.chars().next() == b.chars().next() { 1.0 } else { 0.0 }
        }
    }

    #[test]
    fn similarity_is_pluggable() {
        let v = Vocabulary::new(["leather", "shirt"]).with_similarity(FirstLetter);
        assert_eq!(v.correct("sandal", &HashSet::new()), "shirt");
    }
}

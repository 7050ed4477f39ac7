//! String similarity used by fuzzy term correction.

/// A normalized similarity between two strings: 1.0 for identical input, 0.0
/// for nothing in common.
pub trait StringSimilarity: Send + Sync {
    fn ratio(&self, a: &str, b: &str) -> f64;
}

/// Sequence-matcher ratio: `2 * M / T`, where `T` is the combined length of both
/// strings and `M` the number of characters covered by matching blocks. Blocks
/// are found by taking the longest common substring, then recursing on the
/// pieces to its left and right.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceMatcher;

impl StringSimilarity for SequenceMatcher {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }
        let matched = matching_chars(&a, &b, 0, a.len(), 0, b.len());
        2.0 * matched as f64 / total as f64
    }
}

fn matching_chars(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
    if k == 0 {
        return 0;
    }
    let mut total = k;
    if alo < i && blo < j {
        total += matching_chars(a, b, alo, i, blo, j);
    }
    if i + k < ahi && j + k < bhi {
        total += matching_chars(a, b, i + k, ahi, j + k, bhi);
    }
    total
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
/// Among equally long blocks the one starting earliest in `a` wins, then earliest in `b`.
fn longest_match(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
    let width = bhi - blo;
    // prev[x] / cur[x]: length of the common suffix ending at a[i-1|i] and b[blo + x - 1]
    let mut prev = vec![0usize; width + 1];
    let mut cur = vec![0usize; width + 1];
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    for i in alo..ahi {
        for x in 1..=width {
            let j = blo + x - 1;
            if a[i] == b[j] {
                let k = prev[x - 1] + 1;
                cur[x] = k;
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            } else {
                cur[x] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    (best_i, best_j, best_k)
}

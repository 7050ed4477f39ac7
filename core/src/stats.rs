use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// The `n` most frequent tokens across `corpus`, skipping `stopwords`. Most
/// frequent first; equal counts are ordered alphabetically.
pub fn top_terms<'a, D, S>(corpus: D, stopwords: &HashSet<S>, n: usize) -> Vec<(String, usize)>
where
    D: IntoIterator<Item = &'a [String]>,
    S: std::borrow::Borrow<str> + Eq + std::hash::Hash,
{
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for doc in corpus {
        for token in doc {
            if stopwords.contains(token.as_str()) { continue; }
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().take(n).map(|(t, c)| (t.to_string(), c)).collect()
}

/// One `term count` pair per line.
pub fn write_report<W: Write>(mut out: W, terms: &[(String, usize)]) -> Result<()> {
    for (term, count) in terms {
        writeln!(out, "{term} {count}")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{normalize, STOPWORDS};

    #[test]
    fn counts_skip_stopwords_and_sort() {
        let corpus = vec![normalize("the red shirt and the red hat"), normalize("blue hat")];
        let top = top_terms(corpus.iter().map(Vec::as_slice), &*STOPWORDS, 10);
        assert_eq!(
            top,
            vec![("hat".to_string(), 2), ("red".to_string(), 2), ("blue".to_string(), 1), ("shirt".to_string(), 1)]
        );
    }

    #[test]
    fn truncates_to_n() {
        let corpus = vec![normalize("a b c d")];
        let none: HashSet<&str> = HashSet::new();
        assert_eq!(top_terms(corpus.iter().map(Vec::as_slice), &none, 2).len(), 2);
    }

    #[test]
    fn report_format() {
        let mut buf = Vec::new();
        write_report(&mut buf, &[("hat".to_string(), 2), ("red".to_string(), 1)]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "hat 2\nred 1\n");
    }
}

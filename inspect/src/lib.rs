use anyhow::Result;
use shopsearch_core::stats::{top_terms, write_report};
use shopsearch_core::tokenizer::STOPWORDS;
use shopsearch_core::{Document, SynonymTable, Vocabulary};
use std::io::Write;

/// Write the `n` most frequent non-stopword tokens of the corpus as `term count` lines.
pub fn top_terms_report<W: Write>(docs: &[Document], n: usize, out: W) -> Result<()> {
    let terms = top_terms(docs.iter().map(|d| d.tokens.as_slice()), &*STOPWORDS, n);
    tracing::debug!(reported = terms.len(), "top terms computed");
    write_report(out, &terms)
}

/// For each word print `word -> correction` followed by the ranked candidates.
pub fn corrections_report<W: Write>(
    vocabulary: &Vocabulary,
    synonyms: &SynonymTable,
    words: &[String],
    suggestions: usize,
    mut out: W,
) -> Result<()> {
    for word in words {
        let corrected = vocabulary.correct(word, synonyms.protected_terms());
        write!(out, "{word} -> {corrected}")?;
        if synonyms.protected_terms().contains(word.as_str()) {
            write!(out, " (synonym)")?;
        } else if !vocabulary.contains(word) {
            let candidates: Vec<String> = vocabulary
                .suggestions(word, suggestions)
                .into_iter()
                .map(|(term, ratio)| format!("{term}:{ratio:.2}"))
                .collect();
            if !candidates.is_empty() {
                write!(out, " [{}]", candidates.join(", "))?;
            }
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

use anyhow::Result;

use crate::catalog::Product;
use crate::config::SearchConfig;
use crate::index::{TfIdfIndex, VectorIndex};
use crate::rank::{rank, Filters, SearchHit};
use crate::synonyms::SynonymTable;
use crate::tokenizer::normalize;
use crate::vocab::Vocabulary;

/// Build the document vectors and the correction vocabulary from one catalog.
pub fn build_index(products: Vec<Product>) -> (Vocabulary, VectorIndex) {
    let index = VectorIndex::fit(products);
    let vocabulary = Vocabulary::new(index.terms().iter().cloned());
    (vocabulary, index)
}

/// Intermediate forms of a query on its way to a vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub tokens: Vec<String>,
    pub corrected: Vec<String>,
    pub expanded: Vec<String>,
}

impl QueryPlan {
    pub fn was_corrected(&self) -> bool { self.tokens != self.corrected }
    pub fn corrected_query(&self) -> String { self.corrected.join(" ") }
}

pub fn analyze(raw_query: &str, vocabulary: &Vocabulary, synonyms: &SynonymTable) -> QueryPlan {
    let tokens = normalize(raw_query);
    let protected = synonyms.protected_terms();
    let corrected: Vec<String> = tokens.iter().map(|t| vocabulary.correct(t, protected)).collect();
    let expanded: Vec<String> = synonyms.expand(&corrected).into_iter().collect();
    tracing::debug!(?tokens, ?corrected, ?expanded, "query analyzed");
    QueryPlan { tokens, corrected, expanded }
}

/// Run a free-text query end to end. A blank query yields no results.
pub fn search<'a, I>(
    raw_query: &str,
    index: &'a I,
    vocabulary: &Vocabulary,
    synonyms: &SynonymTable,
    filters: &Filters,
    top_k: usize,
) -> Vec<SearchHit<'a>>
where
    I: TfIdfIndex + ?Sized,
{
    let plan = analyze(raw_query, vocabulary, synonyms);
    let query = index.project(&plan.expanded);
    rank(&query, index, filters, top_k)
}

/// A built index with everything needed to answer queries. Immutable and
/// shareable across threads.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    index: VectorIndex,
    vocabulary: Vocabulary,
    synonyms: SynonymTable,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn build(products: Vec<Product>, synonyms: SynonymTable, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let (vocabulary, index) = build_index(products);
        let vocabulary = vocabulary.with_cutoff(config.fuzzy_cutoff);
        Ok(Self { index, vocabulary, synonyms, config })
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    pub fn analyze(&self, raw_query: &str) -> QueryPlan {
        analyze(raw_query, &self.vocabulary, &self.synonyms)
    }

    /// Search with the configured result count.
    pub fn search(&self, raw_query: &str, filters: &Filters) -> Vec<SearchHit<'_>> {
        search(raw_query, &self.index, &self.vocabulary, &self.synonyms, filters, self.config.top_k)
    }

    /// Search with an already analyzed query.
    pub fn search_plan(&self, plan: &QueryPlan, filters: &Filters, top_k: usize) -> Vec<SearchHit<'_>> {
        let query = self.index.project(&plan.expanded);
        rank(&query, &self.index, filters, top_k)
    }
}

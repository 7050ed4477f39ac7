use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

use crate::catalog::Product;
use crate::tokenizer::tokenize_product;

pub type TermId = u32;
pub type DocId = u32;

/// A catalog entry together with its normalized tokens. `id` is the catalog position.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocId,
    pub product: Product,
    pub tokens: Vec<String>,
}

impl Document {
    pub fn new(id: DocId, product: Product) -> Self {
        let tokens = tokenize_product(&product);
        Self { id, product, tokens }
    }
}

/// Non-negative term weights keyed by term id, kept sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    /// Build from unsorted `(term, weight)` pairs and scale to unit length.
    /// An all-zero input stays the zero vector.
    fn normalized(mut entries: Vec<(TermId, f32)>) -> Self {
        entries.sort_unstable_by_key(|(tid, _)| *tid);
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() { *w /= norm; }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f32)] { &self.entries }
    pub fn is_zero(&self) -> bool { self.entries.iter().all(|(_, w)| *w == 0.0) }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0f32);
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// What the ranker needs from an index: documents, their unit vectors, and a
/// way to place a query in the same space.
pub trait TfIdfIndex: Send + Sync {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool { self.len() == 0 }
    fn document(&self, id: DocId) -> &Document;
    fn vector(&self, id: DocId) -> &SparseVector;
    fn project(&self, tokens: &[String]) -> SparseVector;
}

/// Smoothed TF-IDF vectors over a frozen vocabulary. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    /// Sorted; a term's position is its id.
    terms: Vec<String>,
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    idf: Vec<f32>,
    docs: Vec<Document>,
    vectors: Vec<SparseVector>,
}

impl VectorIndex {
    /// Tokenize and weight every product; ids follow catalog order.
    pub fn fit(products: Vec<Product>) -> Self {
        let docs: Vec<Document> = products
            .into_par_iter()
            .enumerate()
            .map(|(i, p)| Document::new(i as DocId, p))
            .collect();
        Self::fit_documents(docs)
    }

    fn fit_documents(docs: Vec<Document>) -> Self {
        // Term ids are fixed before any parallel weighting so they do not depend on scheduling.
        let terms: Vec<String> = docs
            .iter()
            .flat_map(|d| d.tokens.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let dictionary: HashMap<String, TermId> =
            terms.iter().enumerate().map(|(i, t)| (t.clone(), i as TermId)).collect();

        let counts: Vec<HashMap<TermId, u32>> = docs
            .par_iter()
            .map(|d| term_counts(d.tokens.iter().map(String::as_str), &dictionary))
            .collect();

        let mut df = vec![0u32; terms.len()];
        for tf in &counts {
            for tid in tf.keys() {
                df[*tid as usize] += 1;
            }
        }
        let n = docs.len() as f32;
        let idf: Vec<f32> = df.iter().map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0).collect();

        let vectors: Vec<SparseVector> = counts
            .into_par_iter()
            .map(|tf| weigh(tf, &idf))
            .collect();

        tracing::info!(num_docs = docs.len(), num_terms = terms.len(), "index built");
        Self { terms, dictionary, df, idf, docs, vectors }
    }

    pub fn terms(&self) -> &[String] { &self.terms }
    pub fn documents(&self) -> &[Document] { &self.docs }
    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }
}

impl TfIdfIndex for VectorIndex {
    fn len(&self) -> usize { self.docs.len() }
    fn document(&self, id: DocId) -> &Document { &self.docs[id as usize] }
    fn vector(&self, id: DocId) -> &SparseVector { &self.vectors[id as usize] }

    /// Terms outside the vocabulary are dropped; no known terms gives the zero vector.
    fn project(&self, tokens: &[String]) -> SparseVector {
        let tf = term_counts(tokens.iter().map(String::as_str), &self.dictionary);
        weigh(tf, &self.idf)
    }
}

fn term_counts<'a, I>(tokens: I, dictionary: &HashMap<String, TermId>) -> HashMap<TermId, u32>
where
    I: Iterator<Item = &'a str>,
{
    let mut tf: HashMap<TermId, u32> = HashMap::new();
    for token in tokens {
        if let Some(&tid) = dictionary.get(token) {
            *tf.entry(tid).or_insert(0) += 1;
        }
    }
    tf
}

fn weigh(tf: HashMap<TermId, u32>, idf: &[f32]) -> SparseVector {
    let raw = tf.into_iter().map(|(tid, count)| (tid, count as f32 * idf[tid as usize])).collect();
    SparseVector::normalized(raw)
}

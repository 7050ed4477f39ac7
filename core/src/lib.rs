//! In-memory product catalog search: normalization, fuzzy correction, synonym
//! expansion, TF-IDF vectors and filtered cosine ranking.

pub mod catalog;
pub mod config;
pub mod index;
pub mod rank;
pub mod search;
pub mod similarity;
pub mod stats;
pub mod synonyms;
pub mod tokenizer;
pub mod vocab;

pub use catalog::{load_catalog, Product};
pub use config::SearchConfig;
pub use index::{DocId, Document, SparseVector, TermId, TfIdfIndex, VectorIndex};
pub use rank::{rank, Filters, SearchHit};
pub use search::{analyze, build_index, search, QueryPlan, SearchEngine};
pub use similarity::{SequenceMatcher, StringSimilarity};
pub use synonyms::SynonymTable;
pub use vocab::Vocabulary;

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::tokenizer::normalize;

/// Immutable synonym groups: a canonical key and its ordered synonyms. Lookups
/// work in both directions; a synonym pulls in its key and every sibling.
///
/// Entries go through the same normalization as catalog text. An entry that
/// normalizes to several terms (`"T-Shirt"`, `"hand bag"`) contributes each of
/// them: every term of a multi-word key becomes a key of the group, and every
/// term of a multi-word value becomes a value.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: BTreeMap<String, Vec<String>>,
    /// synonym -> keys listing it
    owners: HashMap<String, Vec<String>>,
    protected: HashSet<String>,
}

impl SynonymTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut table: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, values) in entries {
            let key_terms = normalize(key.as_ref());
            if key_terms.is_empty() {
                tracing::warn!(key = key.as_ref(), "synonym key has no searchable terms, skipped");
                continue;
            }
            let value_terms: Vec<String> = values.into_iter().flat_map(|v| normalize(v.as_ref())).collect();
            for k in &key_terms {
                let group = table.entry(k.clone()).or_default();
                for term in key_terms.iter().chain(&value_terms) {
                    if term != k && !group.contains(term) {
                        group.push(term.clone());
                    }
                }
            }
        }

        let mut owners: HashMap<String, Vec<String>> = HashMap::new();
        let mut protected = HashSet::new();
        for (key, values) in &table {
            protected.insert(key.clone());
            for v in values {
                protected.insert(v.clone());
                owners.entry(v.clone()).or_default().push(key.clone());
            }
        }
        Self { entries: table, owners, protected }
    }

    /// Small general-merchandise table used when no synonyms file is given.
    pub fn builtin() -> Self {
        Self::new([
            ("pro", vec!["professional", "expert"]),
            ("tshirt", vec!["tee", "shirt"]),
            ("shoes", vec!["sneakers", "footwear"]),
            ("phone", vec!["smartphone", "mobile", "cellphone"]),
            ("laptop", vec!["notebook", "computer"]),
            ("headphones", vec!["earphones", "headset", "earbuds"]),
            ("bag", vec!["backpack", "handbag"]),
            ("cheap", vec!["affordable", "budget"]),
            ("tv", vec!["television"]),
        ])
    }

    /// Load a JSON object mapping each key to an array of synonyms.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("opening synonyms {}", path.display()))?;
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parsing synonyms {}", path.display()))?;
        let table = Self::new(raw);
        tracing::info!(path = %path.display(), groups = table.len(), "synonyms loaded");
        Ok(table)
    }

    /// Every key and every synonym. Fuzzy correction must not rewrite these.
    pub fn protected_terms(&self) -> &HashSet<String> { &self.protected }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Union of the tokens and all their synonym groups.
    pub fn expand<S: AsRef<str>>(&self, tokens: &[S]) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for token in tokens {
            let w = token.as_ref();
            out.insert(w.to_string());
            if let Some(values) = self.entries.get(w) {
                out.extend(values.iter().cloned());
            }
            if let Some(keys) = self.owners.get(w) {
                for key in keys {
                    out.insert(key.clone());
                    if let Some(siblings) = self.entries.get(key) {
                        out.extend(siblings.iter().cloned());
                    }
                }
            }
        }
        out
    }
}

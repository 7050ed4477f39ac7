//! Property-based tests for the normalization, correction, expansion and ranking invariants.

use proptest::prelude::*;
use std::collections::HashSet;

use shopsearch_core::tokenizer::{canonicalize, normalize};
use shopsearch_core::{build_index, search, Filters, Product, SynonymTable, TfIdfIndex};

fn arb_product() -> impl Strategy<Value = Product> {
    (
        "[a-d]{1,4}( [a-d]{1,4}){0,4}",
        prop::option::of("[A-Ca-c]{1,3}"),
        prop::option::of(0.0f64..100.0),
    )
        .prop_map(|(name, brand, price)| Product { name: Some(name), brand, price, ..Default::default() })
}

fn table() -> SynonymTable {
    SynonymTable::new([("ab", vec!["abc", "dd"]), ("ca", vec!["cab"])])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Normalizing twice changes nothing
    #[test]
    fn prop_normalize_idempotent(s in any::<String>()) {
        let once = canonicalize(&s);
        prop_assert_eq!(canonicalize(&once), once.clone());
        prop_assert_eq!(normalize(&once), normalize(&s));
    }

    /// Known vocabulary terms come back unchanged
    #[test]
    fn prop_vocabulary_terms_preserved(products in prop::collection::vec(arb_product(), 1..8)) {
        let (vocab, _) = build_index(products);
        for term in vocab.terms() {
            prop_assert_eq!(&vocab.correct(term, &HashSet::new()), term);
        }
    }

    /// Synonym keys and values are never corrected
    #[test]
    fn prop_protected_terms_preserved(products in prop::collection::vec(arb_product(), 1..8)) {
        let (vocab, _) = build_index(products);
        let t = table();
        for term in t.protected_terms() {
            prop_assert_eq!(&vocab.correct(term, t.protected_terms()), term);
        }
    }

    /// Every synonym expands to its key and all of its siblings
    #[test]
    fn prop_expansion_symmetric(
        groups in prop::collection::btree_map("[a-f]{1,4}", prop::collection::vec("[a-f]{1,4}", 1..5), 1..6),
    ) {
        let t = SynonymTable::new(groups.clone());
        for (key, values) in &groups {
            for v in values {
                let out = t.expand(&[v.as_str()]);
                prop_assert!(out.contains(key), "{} does not reach {}", v, key);
                for sibling in values {
                    prop_assert!(out.contains(sibling), "{} does not reach {}", v, sibling);
                }
            }
            let out = t.expand(&[key.as_str()]);
            for v in values {
                prop_assert!(out.contains(v), "{} does not reach {}", key, v);
            }
        }
    }

    /// Non-empty document vectors have unit length
    #[test]
    fn prop_document_vectors_unit_norm(products in prop::collection::vec(arb_product(), 0..10)) {
        let (_, index) = build_index(products);
        for id in 0..index.len() as u32 {
            let v = index.vector(id);
            if !v.is_zero() {
                prop_assert!((v.norm() - 1.0).abs() < 1e-4);
            }
        }
    }

    /// Scores are bounded, ordered, and filters hold for every hit
    #[test]
    fn prop_results_bounded_ordered_filtered(
        products in prop::collection::vec(arb_product(), 0..12),
        query in "[a-d]{1,4}( [a-d]{1,4}){0,2}",
        max_price in prop::option::of(0.0f64..100.0),
        brand in prop::option::of("[a-c]{1,3}"),
        top_k in 1usize..6,
    ) {
        let (vocab, index) = build_index(products);
        let filters = Filters { max_price, brand: brand.clone() };
        let hits = search(&query, &index, &vocab, &table(), &filters, top_k);
        prop_assert!(hits.len() <= top_k);
        for h in &hits {
            prop_assert!(h.score > 0.0 && h.score <= 1.0);
            if let Some(ceiling) = max_price {
                prop_assert!(h.product().price.map_or(false, |p| p <= ceiling));
            }
            if let Some(b) = &brand {
                prop_assert_eq!(h.product().brand().to_lowercase(), b.to_lowercase());
            }
        }
        prop_assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

use inspect::{corrections_report, top_terms_report};
use shopsearch_core::catalog::load_catalog;
use shopsearch_core::{build_index, SynonymTable};
use std::fs;
use tempfile::tempdir;

const CATALOG: &str = r#"[
    {"name": "Cotton T-Shirt", "description": "A soft cotton shirt for the summer", "brand": "Acme", "price": 20},
    {"name": "Leather Boots", "description": "Boots with a leather sole", "brand": "Boot Co", "price": 80},
    {"name": "Professional Shears", "brand": "Acme"}
]"#;

#[test]
fn top_terms_lists_frequent_terms_without_stopwords() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("products.json");
    fs::write(&path, CATALOG).unwrap();
    let (_, index) = build_index(load_catalog(&path).unwrap());

    let mut out = Vec::new();
    top_terms_report(index.documents(), 3, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["acme 2", "boots 2", "cotton 2"]);
    assert!(!text.contains("the "));
}

#[test]
fn corrections_show_candidates() {
    let products = serde_json::from_str(CATALOG).unwrap();
    let (vocab, _) = build_index(products);
    let synonyms = SynonymTable::new([("pro", vec!["professional"])]);
    let words: Vec<String> = ["cotten", "professional", "leather", "xyzzy"].iter().map(|s| s.to_string()).collect();

    let mut out = Vec::new();
    corrections_report(&vocab, &synonyms, &words, 2, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "cotten -> cotton [cotton:0.83]");
    assert_eq!(lines[1], "professional -> professional (synonym)");
    assert_eq!(lines[2], "leather -> leather");
    assert_eq!(lines[3], "xyzzy -> xyzzy");
}

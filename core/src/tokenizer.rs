use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::catalog::Product;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    /// English stopwords for the diagnostic term report. Contractions are listed
    /// in their normalized (apostrophe-split) form, so only the stems remain.
    pub static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could","couldn",
            "d","did","didn","do","does","doesn","doing","don","down","during",
            "each","few","for","from","further",
            "had","hadn","has","hasn","have","haven","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","isn","it","its","itself",
            "ll","let","m","me","more","most","mustn","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "re","s","same","she","should","shouldn","so","some","such",
            "t","than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","ve","very",
            "was","wasn","we","were","weren","what","when","where","which","while","who","whom","why","with","won","would","wouldn",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Canonical form of `text`: lowercase, anything outside `[a-z0-9]` and
/// whitespace becomes a space, runs of whitespace collapse to one, ends trimmed.
pub fn canonicalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned = NON_ALNUM.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&cleaned, " ").trim().to_string()
}

/// Tokenize text into its canonical lowercase terms. An empty vector is a valid result.
pub fn normalize(text: &str) -> Vec<String> {
    canonicalize(text).split(' ').filter(|t| !t.is_empty()).map(str::to_string).collect()
}

/// Searchable text of a product: name, description, brand and country in that
/// order. Price never takes part in the text representation.
pub fn product_text(product: &Product) -> String {
    [&product.name, &product.description, &product.brand, &product.country]
        .iter()
        .map(|field| field.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn tokenize_product(product: &Product) -> Vec<String> {
    normalize(&product_text(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize() {
        let t = normalize("Cotton T-Shirt, 100% organic!");
        assert_eq!(t, vec!["cotton", "t", "shirt", "100", "organic"]);
    }

    #[test]
    fn non_ascii_letters_become_separators() {
        assert_eq!(normalize("Café crème"), vec!["caf", "cr", "me"]);
    }

    #[test]
    fn missing_fields_contribute_nothing() {
        let p = Product { name: Some("Boots".into()), brand: Some("Boot Co".into()), ..Default::default() };
        assert_eq!(tokenize_product(&p), vec!["boots", "boot", "co"]);
    }
}

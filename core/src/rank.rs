use crate::catalog::Product;
use crate::index::{DocId, Document, SparseVector, TfIdfIndex};

/// Optional structured constraints applied while selecting results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    /// Inclusive ceiling. Products without a price never pass. A NaN ceiling is ignored.
    pub max_price: Option<f64>,
    /// Case-insensitive exact brand match.
    pub brand: Option<String>,
}

impl Filters {
    pub fn none() -> Self { Self::default() }

    pub fn max_price(mut self, ceiling: f64) -> Self {
        self.max_price = Some(ceiling);
        self
    }

    pub fn brand<S: Into<String>>(mut self, brand: S) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ceiling) = self.max_price.filter(|c| !c.is_nan()) {
            match product.price {
                Some(price) if price <= ceiling => {}
                _ => return false,
            }
        }
        if let Some(brand) = &self.brand {
            if product.brand().to_lowercase() != brand.to_lowercase() {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub document: &'a Document,
    pub score: f32,
}

impl SearchHit<'_> {
    pub fn doc_id(&self) -> DocId { self.document.id }
    pub fn product(&self) -> &Product { &self.document.product }
}

/// Score every document against `query` and return up to `top_k` that pass
/// `filters`, best first. Equal scores keep catalog order. Documents scoring
/// zero are never returned; filtered-out documents do not use up a slot.
pub fn rank<'a, I>(query: &SparseVector, index: &'a I, filters: &Filters, top_k: usize) -> Vec<SearchHit<'a>>
where
    I: TfIdfIndex + ?Sized,
{
    if top_k == 0 || query.is_zero() {
        return Vec::new();
    }
    let mut scored: Vec<(DocId, f32)> = (0..index.len() as DocId)
        // rounding can push a perfect match a hair past 1
        .map(|id| (id, query.dot(index.vector(id)).clamp(0.0, 1.0)))
        .filter(|(_, score)| *score > 0.0)
        .collect();
    // stable: ties stay in catalog order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut hits = Vec::with_capacity(top_k.min(scored.len()));
    for (id, score) in scored {
        let document = index.document(id);
        if !filters.matches(&document.product) {
            continue;
        }
        hits.push(SearchHit { document, score });
        if hits.len() == top_k {
            break;
        }
    }
    hits
}

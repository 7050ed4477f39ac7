use anyhow::Result;
use shopsearch_core::catalog::parse_price;
use shopsearch_core::{Filters, QueryPlan, SearchEngine, SearchHit};
use std::io::{BufRead, Write};

/// What one round of prompting produced.
#[derive(Debug, PartialEq)]
pub enum Request {
    Quit,
    Search { query: String, filters: Filters },
}

pub fn is_exit(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "exit" | "quit")
}

/// Blank means no ceiling. Anything non-numeric is reported and ignored.
pub fn parse_max_price(raw: &str) -> (Option<f64>, Option<String>) {
    let raw = raw.trim();
    if raw.is_empty() {
        return (None, None);
    }
    match parse_price(raw) {
        Some(p) => (Some(p), None),
        None => (None, Some(format!("Ignoring invalid max price {raw:?}."))),
    }
}

pub fn parse_brand(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// Interactive prompt loop over arbitrary reader/writer pairs.
pub struct Shell<'e, R, W> {
    engine: &'e SearchEngine,
    input: R,
    output: W,
}

impl<'e, R: BufRead, W: Write> Shell<'e, R, W> {
    pub fn new(engine: &'e SearchEngine, input: R, output: W) -> Self {
        Self { engine, input, output }
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Product search. Type 'exit' or 'quit' to leave.")?;
        loop {
            match self.read_request()? {
                Request::Quit => break,
                Request::Search { query, filters } => {
                    let plan = self.engine.analyze(&query);
                    let hits = self.engine.search_plan(&plan, &filters, self.engine.config().top_k);
                    render(&mut self.output, &plan, &hits)?;
                }
            }
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    /// Prompt for query, max price and brand. End of input counts as quitting.
    pub fn read_request(&mut self) -> Result<Request> {
        let query = loop {
            let Some(line) = self.prompt("Search: ")? else { return Ok(Request::Quit) };
            if is_exit(&line) {
                return Ok(Request::Quit);
            }
            if !line.trim().is_empty() {
                break line.trim().to_string();
            }
            writeln!(self.output, "Please enter a search term.")?;
        };

        let mut filters = Filters::none();
        let Some(price) = self.prompt("Max price (blank for none): ")? else { return Ok(Request::Quit) };
        let (max_price, warning) = parse_max_price(&price);
        if let Some(warning) = warning {
            tracing::warn!(input = price.trim(), "invalid max price");
            writeln!(self.output, "{warning}")?;
        }
        filters.max_price = max_price;

        let Some(brand) = self.prompt("Brand (blank for any): ")? else { return Ok(Request::Quit) };
        filters.brand = parse_brand(&brand);

        Ok(Request::Search { query, filters })
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Print the corrected query (when it changed) and one line per hit.
pub fn render<W: Write>(out: &mut W, plan: &QueryPlan, hits: &[SearchHit<'_>]) -> Result<()> {
    if plan.was_corrected() {
        writeln!(out, "Showing results for: {}", plan.corrected_query())?;
    }
    if hits.is_empty() {
        writeln!(out, "No matching products found.")?;
        return Ok(());
    }
    for (rank, hit) in hits.iter().enumerate() {
        let product = hit.product();
        let price = product.price.map_or_else(|| "n/a".to_string(), |p| format!("{p:.2}"));
        let brand = if product.brand().is_empty() { "-" } else { product.brand() };
        writeln!(out, "{}. {} | {} | {} | score {:.3}", rank + 1, product.name(), brand, price, hit.score)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_words_any_case() {
        assert!(is_exit("exit"));
        assert!(is_exit("  QUIT "));
        assert!(!is_exit("exits"));
    }

    #[test]
    fn price_input() {
        assert_eq!(parse_max_price(""), (None, None));
        assert_eq!(parse_max_price(" 25 "), (Some(25.0), None));
        let (p, warn) = parse_max_price("cheap");
        assert_eq!(p, None);
        assert!(warn.is_some());
    }

    #[test]
    fn brand_input() {
        assert_eq!(parse_brand("   "), None);
        assert_eq!(parse_brand(" Acme "), Some("Acme".to_string()));
    }
}
